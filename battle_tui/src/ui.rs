//! UI rendering

mod arena_view;
mod help_view;
mod summary_view;

use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Keybindings footer
        ])
        .split(f.area());

    draw_title(f, app, chunks[0]);

    if app.show_help {
        help_view::draw(f, app, chunks[1]);
    } else {
        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(50), Constraint::Length(38)])
            .split(chunks[1]);
        arena_view::draw(f, app, content[0]);
        summary_view::draw(f, app, content[1]);
    }

    draw_keybindings(f, app, chunks[2]);
}

fn draw_title(f: &mut Frame, app: &App, area: Rect) {
    let boss = app.boss();
    let line = Line::from(vec![
        Span::styled(
            boss.name.clone(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  Lv.{}", boss.level), Style::default().fg(Color::Gray)),
        Span::styled(
            format!("  Round {}", app.driver.session().state().round + 1),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    let title = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL).title(" Boss Arena "))
        .alignment(Alignment::Center);
    f.render_widget(title, area);
}

fn draw_keybindings(f: &mut Frame, app: &App, area: Rect) {
    let mut keys = vec![("a/Space", "Attack"), ("d", "Defend")];
    if !app.driver.session().available_elements().is_empty() {
        keys.push(("1-4", "Element"));
    }
    keys.extend([("n", "Next boss"), ("r", "Restart"), ("?", "Help"), ("q", "Quit")]);

    let mut spans: Vec<Span> = Vec::new();
    for (i, (key, desc)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(Color::White),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Keys "))
        .alignment(Alignment::Center);

    f.render_widget(paragraph, area);
}

/// Colour for an hp bar by remaining fraction
pub fn hp_color(current: u32, max: u32) -> Color {
    let percent = if max > 0 { current as f64 / max as f64 * 100.0 } else { 0.0 };
    if percent > 50.0 {
        Color::Green
    } else if percent > 25.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

pub fn progress_bar(current: u32, max: u32, width: u16) -> String {
    let percent = if max > 0 { current as f64 / max as f64 } else { 0.0 };
    let filled = ((percent * width as f64) as usize).min(width as usize);
    let empty = width as usize - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}
