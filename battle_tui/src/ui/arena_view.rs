//! Arena view: hp bars, effects, floating numbers and the combat log

use crate::app::{App, FLOAT_LIFETIME};
use crate::ui::{hp_color, progress_bar};
use battle_core::combat::{Anchor, FloatColor, FloatingValue};
use battle_core::types::{Element, Outcome, TurnOwner};
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
            Constraint::Length(6), // Boss
            Constraint::Length(5), // Player
            Constraint::Length(3), // Actions
            Constraint::Min(0),    // Combat log
        ])
        .split(area);

    draw_boss(f, app, chunks[0]);
    draw_player(f, app, chunks[1]);
    draw_actions(f, app, chunks[2]);
    draw_log(f, app, chunks[3]);
}

fn draw_boss(f: &mut Frame, app: &App, area: Rect) {
    let session = app.driver.session();
    let state = session.state();
    let boss = session.boss();
    let bar_width = area.width.saturating_sub(4);

    let mut effects: Vec<Span> = vec![Span::styled("Effects: ", Style::default().fg(Color::Gray))];
    if state.effects.is_empty() {
        effects.push(Span::styled("none", Style::default().fg(Color::DarkGray)));
    }
    for effect in state.effects.iter() {
        effects.push(Span::styled(
            format!("{} ({}) ", effect.kind, effect.remaining_turns),
            Style::default().fg(Color::Magenta),
        ));
    }

    let lines = vec![
        hp_line(boss.name.as_str(), state.boss_hp, boss.max_hp, floats_for(app, Anchor::Boss)),
        Line::from(Span::styled(
            progress_bar(state.boss_hp, boss.max_hp, bar_width),
            Style::default().fg(hp_color(state.boss_hp, boss.max_hp)),
        )),
        Line::from(effects),
        Line::from(vec![
            Span::styled("Attack: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{} x{:.1}", boss.attack, state.boss_attack_modifier),
                Style::default().fg(Color::White),
            ),
        ]),
    ];

    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Boss "));
    f.render_widget(widget, area);
}

fn draw_player(f: &mut Frame, app: &App, area: Rect) {
    let session = app.driver.session();
    let state = session.state();
    let player = session.player();
    let bar_width = area.width.saturating_sub(4);

    let stance = if state.is_defending {
        Span::styled("Defending", Style::default().fg(Color::Cyan))
    } else {
        Span::raw("")
    };

    let lines = vec![
        hp_line("You", state.player_hp, player.max_hp, floats_for(app, Anchor::Player)),
        Line::from(Span::styled(
            progress_bar(state.player_hp, player.max_hp, bar_width),
            Style::default().fg(hp_color(state.player_hp, player.max_hp)),
        )),
        Line::from(vec![
            Span::styled(format!("CP {}  ", player.combat_power), Style::default().fg(Color::DarkGray)),
            stance,
        ]),
    ];

    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Player "));
    f.render_widget(widget, area);
}

fn draw_actions(f: &mut Frame, app: &App, area: Rect) {
    let session = app.driver.session();
    let status = match (session.outcome(), session.state().turn_owner) {
        (Some(Outcome::Victory), _) => Span::styled(
            "VICTORY",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        (Some(Outcome::Defeat), _) => Span::styled(
            "DEFEAT",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        (None, TurnOwner::Boss) => Span::styled("Boss is acting...", Style::default().fg(Color::Yellow)),
        (None, TurnOwner::Player) => Span::styled("Your move", Style::default().fg(Color::White)),
    };

    let available = session.available_elements();
    let mut spans = vec![status, Span::raw("   ")];
    for (slot, element) in Element::all().iter().enumerate() {
        let style = if available.contains(element) && session.can_act() {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!("[{}] {}  ", slot + 1, element), style));
    }

    let widget = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(widget, area);
}

fn draw_log(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .driver
        .log()
        .lines()
        .map(|line| ListItem::new(Line::from(line.to_string())))
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Combat Log "));
    f.render_widget(list, area);
}

fn hp_line<'a>(name: &'a str, hp: u32, max_hp: u32, floats: Vec<Span<'a>>) -> Line<'a> {
    let mut spans = vec![
        Span::styled(format!("{}: ", name), Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{}/{}", hp, max_hp),
            Style::default().fg(hp_color(hp, max_hp)).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
    ];
    spans.extend(floats);
    Line::from(spans)
}

fn floats_for(app: &App, anchor: Anchor) -> Vec<Span<'static>> {
    let now = app.driver.now();
    app.floats
        .iter()
        .filter(|(_, value)| value.anchor == anchor)
        .map(|(at, value)| {
            let fading = now.saturating_sub(*at) > FLOAT_LIFETIME / 2;
            float_span(value, fading)
        })
        .collect()
}

fn float_span(value: &FloatingValue, fading: bool) -> Span<'static> {
    let (text, color) = match value.color {
        FloatColor::Hit => (format!("-{}", value.amount), Color::White),
        FloatColor::Crit => (format!("-{}!", value.amount), Color::LightRed),
        FloatColor::Heal => (format!("+{}", value.amount), Color::Green),
        FloatColor::Hurt => (format!("-{}", value.amount), Color::Red),
        FloatColor::Miss => ("MISS".to_string(), Color::Cyan),
        FloatColor::DamageOverTime => (format!("-{}", value.amount), Color::Magenta),
    };
    let mut style = Style::default().fg(color);
    if value.is_crit {
        style = style.add_modifier(Modifier::BOLD);
    }
    if fading {
        style = style.add_modifier(Modifier::DIM);
    }
    Span::styled(format!("{} ", text), style)
}
