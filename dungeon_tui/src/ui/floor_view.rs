//! Floor selection view

use super::{section, stat_line};
use crate::app::App;
use dungeon_core::{get_floor_time_cost, get_loot_multiplier, DungeonFloor};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(32), // Floor list
            Constraint::Min(40),    // Details
        ])
        .split(area);

    draw_floor_list(f, app, chunks[0]);
    if let Some(floor) = app.selected_floor() {
        draw_floor_details(f, app, floor, chunks[1]);
    }
}

fn draw_floor_list(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .session
        .registry()
        .floors()
        .iter()
        .enumerate()
        .map(|(i, floor)| {
            let cleared = app.session.player.floors_cleared.contains(&floor.id);
            let open = app.session.floor_eligibility(floor).can_enter;
            let (icon, color) = if cleared {
                ("✓", Color::Green)
            } else if open {
                ("▶", Color::Yellow)
            } else {
                ("✗", Color::DarkGray)
            };

            let mut style = Style::default().fg(color);
            if i == app.selected_floor {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }

            ListItem::new(Line::from(Span::styled(
                format!(" {} {}. {}", icon, floor.id, floor.name),
                style,
            )))
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Floors "));
    f.render_widget(list, area);
}

fn draw_floor_details(f: &mut Frame, app: &App, floor: &DungeonFloor, area: Rect) {
    let session = &app.session;
    let stats = session.combat_stats();
    let eligibility = session.floor_eligibility(floor);

    let mut lines = vec![
        Line::from(Span::styled(
            floor.name.clone(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            floor.description.clone(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        section("Floor"),
        stat_line(
            "Boss",
            format!("{} (power {})", floor.boss.name, floor.boss.base_power),
        ),
        stat_line(
            "Encounters",
            format!("{} + boss", floor.normal_encounters),
        ),
        stat_line(
            "Gold per fight",
            format!("{}-{}", floor.gold_range.min, floor.gold_range.max),
        ),
        stat_line(
            "Damage per fight",
            format!("{}-{}", floor.health_risk_range.min, floor.health_risk_range.max),
        ),
        stat_line(
            "Loot multiplier",
            format!(
                "×{:.2}",
                get_loot_multiplier(floor, session.player.guild_rank)
            ),
        ),
        stat_line(
            "Time",
            format!(
                "{}h ({}h per encounter)",
                get_floor_time_cost(floor, &stats),
                session.hours_per_encounter(floor)
            ),
        ),
        stat_line("Rare drop", floor.rare_drop.name.clone()),
    ];

    if let Some(mini_boss) = &floor.mini_boss {
        lines.push(stat_line(
            "Mini-boss",
            format!(
                "{} ({:.0}% chance)",
                mini_boss.name,
                floor.mini_boss_chance * 100.0
            ),
        ));
    }

    lines.push(Line::from(""));
    lines.push(section("Entry"));
    if eligibility.can_enter {
        lines.push(Line::from(Span::styled(
            "  Ready to enter",
            Style::default().fg(Color::Green),
        )));
    }
    for reason in &eligibility.reasons {
        lines.push(Line::from(Span::styled(
            format!("  ✗ {}", reason),
            Style::default().fg(Color::Red),
        )));
    }
    for hint in session.floor_hints(floor) {
        lines.push(Line::from(Span::styled(
            format!("  ! {}", hint),
            Style::default().fg(Color::Yellow),
        )));
    }

    if let Some(record) = session.records.get(floor.id) {
        lines.push(Line::from(""));
        lines.push(section("Records"));
        lines.push(stat_line("Best gold", record.best_gold.to_string()));
        lines.push(stat_line(
            "Most encounters",
            record.best_encounters.to_string(),
        ));
        lines.push(stat_line("Runs", record.runs.to_string()));
    }

    if let Some((floor_id, sim)) = &app.simulation {
        if *floor_id == floor.id {
            lines.push(Line::from(""));
            lines.push(section(&format!("Simulation ({} runs)", sim.runs)));
            lines.push(stat_line("Clear rate", format!("{:.1}%", sim.clear_rate())));
            lines.push(stat_line("Defeat rate", format!("{:.1}%", sim.defeat_rate())));
            lines.push(stat_line("Avg gold", format!("{:.1}", sim.avg_gold())));
            lines.push(stat_line("Rare drops", sim.rare_drops.to_string()));
        }
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(format!(" Floor {} ", floor.id)));
    f.render_widget(paragraph, area);
}
