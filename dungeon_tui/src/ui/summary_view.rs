//! Run summary view

use super::{section, stat_line};
use crate::app::App;
use dungeon_core::RunOutcome;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let Some((state, result)) = &app.session.last_run else {
        let paragraph = Paragraph::new("No finished runs yet.")
            .block(Block::default().borders(Borders::ALL).title(" Summary "));
        f.render_widget(paragraph, area);
        return;
    };

    let floor_name = app
        .session
        .registry()
        .get(result.floor_id)
        .map_or("Unknown floor", |floor| floor.name.as_str());

    let outcome_color = match result.outcome {
        RunOutcome::Cleared => Color::Green,
        RunOutcome::Retreated | RunOutcome::OutOfTime => Color::Yellow,
        RunOutcome::Defeated => Color::Red,
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} - {}", floor_name, result.outcome.label()),
            Style::default().fg(outcome_color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section("Rewards"),
        stat_line("Gold found", state.total_gold.to_string()),
        stat_line("Gold earned", result.gold_earned.to_string()),
        stat_line("Happiness", format!("{:+}", result.happiness_change)),
        stat_line(
            "Encounters",
            format!("{}/{}", result.encounters_completed, state.encounters.len()),
        ),
        stat_line("Damage taken", state.total_damage.to_string()),
        stat_line("Healed", state.total_healed.to_string()),
    ];

    if result.is_first_clear {
        lines.push(Line::from(Span::styled(
            "  ★ First clear! The next floor is open.",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )));
    }
    if let Some(drop) = &result.rare_drop_name {
        lines.push(Line::from(Span::styled(
            format!("  ◆ Rare drop: {}", drop),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        )));
    }

    lines.push(Line::from(""));
    lines.push(section("Encounter log"));
    for (i, encounter) in state.results.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}. ", i + 1), Style::default().fg(Color::DarkGray)),
            Span::styled(
                encounter.encounter_name.clone(),
                Style::default().fg(Color::White),
            ),
            Span::styled(
                format!(" - {}", encounter.summary()),
                Style::default().fg(Color::Gray),
            ),
        ]));
    }

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Summary "));
    f.render_widget(paragraph, area);
}
