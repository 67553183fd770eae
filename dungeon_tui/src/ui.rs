//! UI rendering

mod floor_view;
mod help_view;
mod run_view;
mod summary_view;

use crate::app::{App, Screen};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Screen bar
            Constraint::Length(3), // Player status
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Keybindings footer
        ])
        .split(f.area());

    draw_screens(f, app, chunks[0]);
    draw_player_bar(f, app, chunks[1]);

    match app.screen {
        Screen::Floors => floor_view::draw(f, app, chunks[2]),
        Screen::Run => run_view::draw(f, app, chunks[2]),
        Screen::Summary => summary_view::draw(f, app, chunks[2]),
        Screen::Help => help_view::draw(f, app, chunks[2]),
    }

    draw_keybindings(f, app, chunks[3]);
}

fn draw_keybindings(f: &mut Frame, app: &App, area: Rect) {
    let common_keys = vec![("?", "Help"), ("q", "Quit")];

    let screen_keys: Vec<(&str, &str)> = match app.screen {
        Screen::Floors => vec![
            ("↑/↓", "Select floor"),
            ("Enter", "Enter floor"),
            ("s", "Simulate"),
            ("1/2/3", "Swap gear"),
            ("w", "Next week"),
        ],
        Screen::Run => {
            let mut keys = vec![("Enter/f", "Fight/Continue")];
            if app.session.can_retreat() {
                keys.push(("r", "Retreat"));
            }
            keys.push(("a", if app.auto_play { "Stop auto" } else { "Auto-play" }));
            keys.push(("↑/↓", "Scroll log"));
            keys
        }
        Screen::Summary => vec![("Enter", "Back to floors")],
        Screen::Help => vec![],
    };

    let mut spans: Vec<Span> = Vec::new();

    for (i, (key, desc)) in screen_keys.iter().enumerate() {
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

    if !screen_keys.is_empty() {
        spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
    }

    for (i, (key, desc)) in common_keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(Color::Cyan),
        ));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(Color::Gray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Keys "))
        .alignment(ratatui::layout::Alignment::Center);

    f.render_widget(paragraph, area);
}

fn draw_screens(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Screen::all()
        .iter()
        .map(|s| {
            let style = if *s == app.screen {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(s.name(), style))
        })
        .collect();

    let selected = Screen::all()
        .iter()
        .position(|s| *s == app.screen)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Dungeon - Week {} - seed {} ", app.week, app.seed)),
        )
        .highlight_style(Style::default().fg(Color::Yellow))
        .divider("|");

    f.render_widget(tabs, area);
}

fn draw_player_bar(f: &mut Frame, app: &App, area: Rect) {
    let player = &app.session.player;
    let stats = app.session.combat_stats();
    let progress = app.session.progress();

    let mut spans = vec![
        Span::styled(
            format!("{} ", player.name),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled("HP ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{}/{}", player.health, player.max_health),
            Style::default().fg(health_color(player.health, player.max_health)),
        ),
        Span::styled("  Gold ", Style::default().fg(Color::Gray)),
        Span::styled(player.gold.to_string(), Style::default().fg(Color::Yellow)),
        Span::styled("  Happiness ", Style::default().fg(Color::Gray)),
        Span::styled(player.happiness.to_string(), Style::default().fg(Color::Magenta)),
        Span::styled("  Time ", Style::default().fg(Color::Gray)),
        Span::styled(format!("{}h", player.hours_left), Style::default().fg(Color::White)),
        Span::styled(
            format!(
                "  ATK {} DEF {} BLK {:.0}%",
                stats.attack,
                stats.defense,
                stats.block_chance * 100.0
            ),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!(
                "  Floors {}/{}",
                progress.total_floors_cleared, progress.total_floors
            ),
            Style::default().fg(Color::Green),
        ),
    ];

    if let Some(status) = &app.status {
        spans.push(Span::styled(
            format!("  » {}", status),
            Style::default().fg(Color::LightYellow),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Adventurer "));
    f.render_widget(paragraph, area);
}

pub fn health_color(current: i32, max: i32) -> Color {
    let percent = if max > 0 {
        current as f64 / max as f64 * 100.0
    } else {
        0.0
    };
    if percent > 50.0 {
        Color::Green
    } else if percent > 25.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

pub fn progress_bar(current: f64, max: f64, width: u16, filled_color: Color) -> Paragraph<'static> {
    let percent = if max > 0.0 {
        (current / max).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (percent * width as f64) as usize;
    let empty = (width as usize).saturating_sub(filled);

    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(empty));

    Paragraph::new(bar).style(Style::default().fg(filled_color))
}

pub fn stat_line(name: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:18}", name), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

pub fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("── {} ──", title),
        Style::default().fg(Color::Cyan),
    ))
}
