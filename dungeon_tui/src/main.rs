//! dungeon_tui - Interactive TUI for playing and balancing dungeon runs

mod app;
mod session;
mod simulation;
mod ui;

use app::App;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dungeon_core::{EquipmentCatalog, EquipmentSlot, FloorRegistry};
use env_logger::{Builder, Env, Target};
use ratatui::{backend::CrosstermBackend, Terminal};
use session::{DungeonSession, PlayerState};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Log file; the terminal belongs to the UI
const LOG_FILE: &str = "dungeon_tui.log";

#[derive(Debug, Parser)]
#[command(name = "dungeon_tui", version)]
#[command(about = "Play and balance dungeon runs in the terminal")]
struct Args {
    /// Seed for every roll; a run replays exactly from the same seed
    #[arg(long, short)]
    seed: Option<u64>,

    /// Floors TOML file replacing the built-in table
    #[arg(long, env = "DUNGEON_FLOORS")]
    floors: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(File::create(LOG_FILE)?)))
        .init();

    let seed = args.seed.unwrap_or_else(clock_seed);
    let registry = match &args.floors {
        Some(path) => FloorRegistry::load(path),
        None => FloorRegistry::builtin(),
    }
    .map_err(io::Error::other)?;
    let catalog = EquipmentCatalog::builtin().map_err(io::Error::other)?;
    log::info!(
        "Starting with seed {} ({} floors, {} items)",
        seed,
        registry.len(),
        catalog.len()
    );

    let session = DungeonSession::new(registry, catalog, PlayerState::starter("Adventurer"));
    let mut app = App::new(session, seed);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(std::time::Duration::from_millis(150))? {
            if let Event::Key(key) = event::read()? {
                match (key.code, key.modifiers) {
                    (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => break,
                    (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.on_up(),
                    (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.on_down(),
                    (KeyCode::Enter, _) => app.on_enter(),
                    (KeyCode::Char('f'), _) => app.step(),
                    (KeyCode::Char('r'), _) => app.retreat(),
                    (KeyCode::Char('a'), _) => app.toggle_auto_play(),
                    (KeyCode::Char('s'), _) => app.simulate_selected(),
                    (KeyCode::Char('w'), _) => app.next_week(),
                    (KeyCode::Char('1'), _) => app.cycle_gear(EquipmentSlot::Weapon),
                    (KeyCode::Char('2'), _) => app.cycle_gear(EquipmentSlot::Armor),
                    (KeyCode::Char('3'), _) => app.cycle_gear(EquipmentSlot::Shield),
                    (KeyCode::Char('?'), _) => app.toggle_help(),
                    _ => {}
                }
            }
        }

        // Auto-play
        app.tick();
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    match app.session.snapshot_json() {
        Ok(json) => log::info!("Final state: {}", json),
        Err(err) => log::error!("Could not serialize final state: {}", err),
    }

    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
