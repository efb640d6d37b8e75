//! Side panel: battle result, banked rewards and past fights

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9), // Result
            Constraint::Length(8), // Purse
            Constraint::Min(0),    // History
        ])
        .split(area);

    draw_result(f, app, chunks[0]);
    draw_purse(f, app, chunks[1]);
    draw_history(f, app, chunks[2]);
}

fn draw_result(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();

    match app.completion() {
        None => lines.push(Line::from(Span::styled("In progress", Style::default().fg(Color::DarkGray)))),
        Some(completion) if !completion.success => {
            lines.push(Line::from(Span::styled(
                "Defeated",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from("[r] to try again"));
        }
        Some(completion) => {
            lines.push(Line::from(Span::styled(
                "Victory!",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(format!("HP left: {}", completion.final_player_hp)));
            if let Some(rewards) = &completion.rewards {
                lines.push(Line::from(format!("+{} XP  +{} gold", rewards.experience, rewards.gold)));
                for stack in rewards.items.iter().chain(rewards.gems.iter()) {
                    lines.push(Line::from(Span::styled(
                        format!("  {} x{}", stack.name, stack.quantity),
                        Style::default().fg(Color::Yellow),
                    )));
                }
            }
        }
    }

    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Result "));
    f.render_widget(widget, area);
}

fn draw_purse(f: &mut Frame, app: &App, area: Rect) {
    let purse = &app.purse;
    let mut lines = vec![Line::from(format!("{} XP  {} gold", purse.experience, purse.gold))];
    for (name, quantity) in &purse.items {
        lines.push(Line::from(Span::styled(
            format!("  {} x{}", name, quantity),
            Style::default().fg(Color::Gray),
        )));
    }

    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Purse "));
    f.render_widget(widget, area);
}

fn draw_history(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .history
        .iter()
        .rev()
        .map(|record| {
            let color = match record.outcome {
                Some(outcome) if outcome.is_victory() => Color::Green,
                Some(_) => Color::Red,
                None => Color::DarkGray,
            };
            ListItem::new(Line::from(Span::styled(
                format!("{} ({} rounds)", record.boss, record.rounds),
                Style::default().fg(color),
            )))
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" History "));
    f.render_widget(list, area);
}
