//! Help view

use crate::app::App;
use dungeon_core::constants::{
    DEFEAT_GOLD_FACTOR, RETREAT_GOLD_FACTOR, TRAP_DISARM_CHANCE, TIME_REDUCTION_DIVISOR,
};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame, _app: &App, area: Rect) {
    let lines = vec![
        heading("═══ Navigation ═══"),
        key_line("↑/k  ↓/j", "Select floor / scroll log"),
        key_line("Enter", "Enter floor, fight, continue"),
        key_line("q / Ctrl+C", "Quit"),
        key_line("?", "Toggle help"),
        Line::from(""),
        heading("═══ Floors ═══"),
        key_line("s", "Simulate runs on the selected floor"),
        key_line("1 / 2 / 3", "Swap weapon / armor / shield (between runs)"),
        key_line("w", "Start a new week (time and health refill)"),
        Line::from(""),
        heading("═══ Runs ═══"),
        key_line("f / Enter", "Fight the encounter, then continue"),
        key_line("r", "Retreat (not with a boss ahead)"),
        key_line("a", "Toggle auto-play"),
        Line::from(""),
        heading("═══ Game Mechanics ═══"),
        Line::from(""),
        rule("Time:"),
        Line::from(format!(
            "  Every {} points of attack + defense saves an hour per floor",
            TIME_REDUCTION_DIVISOR
        )),
        Line::from("  Each encounter costs its share of the floor time up front"),
        Line::from(""),
        rule("Damage:"),
        Line::from("  Rolled from the floor's risk range, scaled up for bosses"),
        Line::from("  Defense softens hits, a block stops them entirely"),
        Line::from("  Combat training reduces whatever gets through"),
        Line::from(""),
        rule("Traps & ethereal foes:"),
        Line::from(format!(
            "  Scholars disarm traps {:.0}% of the time",
            TRAP_DISARM_CHANCE * 100.0
        )),
        Line::from("  Without arcane training, ethereal monsters yield little gold"),
        Line::from(""),
        rule("Leaving early:"),
        Line::from(format!(
            "  Retreat keeps {:.0}% of gold, defeat keeps {:.0}%",
            RETREAT_GOLD_FACTOR * 100.0,
            DEFEAT_GOLD_FACTOR * 100.0
        )),
        Line::from("  Running out of time keeps everything"),
        Line::from("  Only the first boss kill on a floor grants happiness"),
    ];

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Help & Mechanics "));

    f.render_widget(paragraph, area);
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

fn rule(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::Yellow),
    ))
}

fn key_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:20}", key), Style::default().fg(Color::Yellow)),
        Span::styled(desc.to_string(), Style::default().fg(Color::White)),
    ])
}
