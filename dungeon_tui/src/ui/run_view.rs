//! Active run view

use super::{health_color, progress_bar, section, stat_line};
use crate::app::App;
use dungeon_core::{DungeonRunState, EncounterKind, RunPhase};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let Some(state) = app.session.run_state() else {
        let paragraph = Paragraph::new("No run in progress. Pick a floor first.")
            .block(Block::default().borders(Borders::ALL).title(" Run "));
        f.render_widget(paragraph, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(50),    // Status and log
            Constraint::Length(34), // Encounter list
        ])
        .split(area);

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Status
            Constraint::Min(0),    // Log
        ])
        .split(chunks[0]);

    draw_status(f, app, state, main_chunks[0]);
    draw_log(f, app, main_chunks[1]);
    draw_encounters(f, state, chunks[1]);
}

fn draw_status(f: &mut Frame, app: &App, state: &DungeonRunState, area: Rect) {
    let max_health = app.session.player.max_health;
    let color = health_color(state.current_health, max_health);

    let prompt = match (state.phase, state.current_encounter()) {
        (RunPhase::EncounterIntro, Some(encounter)) => {
            format!("{} {} blocks the way.", encounter.kind.label(), encounter.name)
        }
        (RunPhase::EncounterResult, _) => match state.upcoming_encounter() {
            Some(next) => format!("Next: {} {}", next.kind.label(), next.name),
            None => "The floor is quiet. Continue to leave.".to_string(),
        },
        _ => String::new(),
    };

    let mut header = vec![
        Span::styled("HP ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{}/{}", state.current_health, max_health),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  Gold found ", Style::default().fg(Color::Gray)),
        Span::styled(state.total_gold.to_string(), Style::default().fg(Color::Yellow)),
    ];
    if let Some(modifier) = &state.modifier {
        header.push(Span::styled(
            format!("  {} {}", modifier.icon, modifier.name),
            Style::default().fg(modifier_color(&modifier.color)),
        ));
    }

    let lines = vec![
        Line::from(header),
        Line::from(Span::styled(prompt, Style::default().fg(Color::White))),
    ];

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(1)])
        .margin(1)
        .split(area);

    f.render_widget(
        Block::default().borders(Borders::ALL).title(" Status "),
        area,
    );
    f.render_widget(Paragraph::new(lines), inner[0]);
    f.render_widget(
        progress_bar(
            state.current_health as f64,
            max_health as f64,
            inner[1].width,
            color,
        ),
        inner[1],
    );
}

fn draw_log(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .session
        .log
        .iter()
        .skip(app.log_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|line| {
            let style = if line.contains("FATAL") || line.contains("collapse") {
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
            } else if line.contains("found ") && line.contains('!') {
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
            } else if line.starts_with("Boss") || line.starts_with("Mini-Boss") {
                Style::default().fg(Color::Yellow)
            } else if line.starts_with("Trap") {
                Style::default().fg(Color::LightRed)
            } else if line.starts_with("Entered") {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(Span::styled(line.clone(), style)))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Log (↑/↓ to scroll) "),
    );
    f.render_widget(list, area);
}

fn draw_encounters(f: &mut Frame, state: &DungeonRunState, area: Rect) {
    let mut lines = vec![section("Encounters")];

    for (i, encounter) in state.encounters.iter().enumerate() {
        let (marker, style) = if i < state.results.len() {
            ("✓", Style::default().fg(Color::DarkGray))
        } else if i == state.current_encounter_index {
            ("▶", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        } else {
            ("·", Style::default().fg(Color::White))
        };
        let kind_color = match encounter.kind {
            EncounterKind::Boss => Color::Red,
            EncounterKind::MiniBoss => Color::LightRed,
            EncounterKind::Trap => Color::Magenta,
            EncounterKind::Normal => Color::Gray,
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(encounter.name.clone(), style),
            Span::styled(
                format!(" [{}]", encounter.kind.label()),
                Style::default().fg(kind_color),
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(section("Totals"));
    lines.push(stat_line("Damage taken", state.total_damage.to_string()));
    lines.push(stat_line("Healed", state.total_healed.to_string()));
    if let Some(drop) = &state.rare_drop_name {
        lines.push(stat_line("Rare drop", drop.clone()));
    }
    if state.is_first_clear {
        lines.push(Line::from(Span::styled(
            " First clear attempt",
            Style::default().fg(Color::Green),
        )));
    }

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Floor "));
    f.render_widget(paragraph, area);
}

fn modifier_color(name: &str) -> Color {
    match name {
        "yellow" => Color::Yellow,
        "magenta" => Color::Magenta,
        "green" => Color::Green,
        "red" => Color::Red,
        "cyan" => Color::Cyan,
        _ => Color::White,
    }
}
