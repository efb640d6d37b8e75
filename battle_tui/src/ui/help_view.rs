//! Help view

use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let constants = app.driver.session().constants();
    let elements = &constants.elements;
    let effects = &constants.effects;

    let lines = vec![
        heading("═══ Actions ═══"),
        key_line("a / Space", "Attack (life steal applies)"),
        key_line("d", "Defend: halves the next boss strike"),
        key_line("1-4", "Fire / Ice / Lightning / Poison strike"),
        Line::from(""),
        heading("═══ Battle ═══"),
        key_line("n", "Leave and face the next boss"),
        key_line("r", "Restart against the same boss"),
        key_line("q / Esc", "Close and quit"),
        key_line("?", "Toggle help"),
        Line::from(""),
        heading("═══ Elements ═══"),
        Line::from(format!(
            "  Fire x{:.1}: burn {:.0}% max HP for {} turns",
            elements.fire_multiplier,
            effects.burn_fraction * 100.0,
            effects.burn_turns
        )),
        Line::from(format!(
            "  Ice x{:.1}: boss attack x{:.1} for {} turns",
            elements.ice_multiplier, effects.slow_modifier, effects.slow_turns
        )),
        Line::from(format!("  Lightning x{:.1}: always shown as critical", elements.lightning_multiplier)),
        Line::from(format!(
            "  Poison x{:.1}: {:.0}% max HP for {} turns",
            elements.poison_multiplier,
            effects.poison_fraction * 100.0,
            effects.poison_turns
        )),
        Line::from("  Re-applying an effect refreshes it; effects never stack."),
    ];

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Help "))
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

fn key_line(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:12}", key), Style::default().fg(Color::Yellow)),
        Span::styled(desc, Style::default().fg(Color::White)),
    ])
}
