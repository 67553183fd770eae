//! Application state

use crate::session::{ContinueOutcome, DungeonSession, SessionError};
use crate::simulation::{RetreatPolicy, RunSimulation};
use dungeon_core::{DungeonFloor, EquipmentSlot, FloorId, RngSource, RunPhase};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Hours available at the start of every week
pub const HOURS_PER_WEEK: u32 = 60;

/// Runs played by the balance simulation
const SIMULATION_RUNS: u32 = 200;

/// Auto-play retreats below this share of the health it entered with
const AUTO_RETREAT_FRACTION: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Floors,
    Run,
    Summary,
    Help,
}

impl Screen {
    pub fn all() -> &'static [Screen] {
        &[Screen::Floors, Screen::Run, Screen::Summary, Screen::Help]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Screen::Floors => "Floors",
            Screen::Run => "Run",
            Screen::Summary => "Summary",
            Screen::Help => "Help",
        }
    }
}

pub struct App {
    pub screen: Screen,
    previous_screen: Screen,
    pub session: DungeonSession,
    pub rng: RngSource<ChaCha8Rng>,
    pub seed: u64,
    pub selected_floor: usize,
    pub log_scroll: usize,
    pub week: u32,
    /// One-line feedback for the last action
    pub status: Option<String>,
    pub auto_play: bool,
    /// Health the current run started with, for the auto-play retreat check
    run_start_health: i32,
    pub simulation: Option<(FloorId, RunSimulation)>,
}

impl App {
    pub fn new(session: DungeonSession, seed: u64) -> Self {
        App {
            screen: Screen::Floors,
            previous_screen: Screen::Floors,
            session,
            rng: RngSource::new(ChaCha8Rng::seed_from_u64(seed)),
            seed,
            selected_floor: 0,
            log_scroll: 0,
            week: 1,
            status: None,
            auto_play: false,
            run_start_health: 0,
            simulation: None,
        }
    }

    pub fn selected_floor(&self) -> Option<&DungeonFloor> {
        self.session.registry().floors().get(self.selected_floor)
    }

    // === Navigation ===

    pub fn on_up(&mut self) {
        match self.screen {
            Screen::Floors => self.selected_floor = self.selected_floor.saturating_sub(1),
            Screen::Run => self.log_scroll = self.log_scroll.saturating_sub(1),
            _ => {}
        }
    }

    pub fn on_down(&mut self) {
        match self.screen {
            Screen::Floors => {
                let last = self.session.registry().len().saturating_sub(1);
                self.selected_floor = (self.selected_floor + 1).min(last);
            }
            Screen::Run => {
                let max = self.session.log.len().saturating_sub(1);
                self.log_scroll = (self.log_scroll + 1).min(max);
            }
            _ => {}
        }
    }

    /// Primary action of the current screen
    pub fn on_enter(&mut self) {
        match self.screen {
            Screen::Floors => self.enter_selected_floor(),
            Screen::Run => self.step(),
            Screen::Summary => self.screen = Screen::Floors,
            Screen::Help => self.toggle_help(),
        }
    }

    pub fn toggle_help(&mut self) {
        if self.screen == Screen::Help {
            self.screen = self.previous_screen;
        } else {
            self.previous_screen = self.screen;
            self.screen = Screen::Help;
        }
    }

    // === Run actions ===

    pub fn enter_selected_floor(&mut self) {
        let Some(floor_id) = self.selected_floor().map(|f| f.id) else {
            return;
        };
        let health = self.session.player.health;
        let result = self.session.enter_floor(floor_id, &mut self.rng).map(|_| ());
        if self.report(result) {
            self.run_start_health = health;
            self.screen = Screen::Run;
            self.auto_scroll();
        }
    }

    /// Fight in the intro phase, press on after a result
    pub fn step(&mut self) {
        match self.session.run_state().map(|s| s.phase) {
            Some(RunPhase::EncounterIntro) => self.fight(),
            Some(RunPhase::EncounterResult) => self.continue_run(),
            _ => {}
        }
    }

    pub fn fight(&mut self) {
        let result = self.session.fight(&mut self.rng).map(|_| ());
        self.report(result);
        self.after_action();
    }

    pub fn continue_run(&mut self) {
        match self.session.continue_run() {
            Ok(ContinueOutcome::Advanced) => self.status = None,
            Ok(ContinueOutcome::FloorComplete) => {
                self.status = Some("Floor complete!".to_string())
            }
            Ok(ContinueOutcome::OutOfTime) => {
                self.status = Some("Out of time for this week".to_string())
            }
            Err(err) => self.status = Some(err.to_string()),
        }
        self.after_action();
    }

    pub fn retreat(&mut self) {
        let result = self.session.retreat();
        self.report(result);
        self.after_action();
    }

    pub fn toggle_auto_play(&mut self) {
        self.auto_play = !self.auto_play && self.session.in_run();
    }

    /// Start a new week: hours refill, health recovers
    pub fn next_week(&mut self) {
        if self.session.in_run() {
            self.status = Some("Finish the run first".to_string());
            return;
        }
        self.session.player.rest(HOURS_PER_WEEK);
        self.week += 1;
        self.status = Some(format!("Week {} begins", self.week));
    }

    /// Swap gear between runs
    pub fn cycle_gear(&mut self, slot: EquipmentSlot) {
        match self.session.cycle_gear(slot) {
            Ok(name) => {
                self.simulation = None;
                self.status = Some(format!("{} equipped", name));
            }
            Err(err) => self.status = Some(err.to_string()),
        }
    }

    /// Simulate many runs on the selected floor with the current gear
    pub fn simulate_selected(&mut self) {
        let Some(floor) = self.selected_floor().cloned() else {
            return;
        };
        let stats = self.session.combat_stats();
        let education = self.session.player.education();
        let simulation = RunSimulation::run(
            &floor,
            &stats,
            &education,
            self.session.player.max_health,
            RetreatPolicy::BelowFraction(AUTO_RETREAT_FRACTION),
            SIMULATION_RUNS,
            &mut self.rng,
        );
        match simulation {
            Ok(sim) => {
                self.status = Some(format!(
                    "{}: {:.0}% clears, {:.0}% defeats, {:.1} gold/run",
                    floor.name,
                    sim.clear_rate(),
                    sim.defeat_rate(),
                    sim.avg_gold()
                ));
                self.simulation = Some((floor.id, sim));
            }
            Err(err) => self.status = Some(err.to_string()),
        }
    }

    /// Advance auto-play by one action
    pub fn tick(&mut self) {
        if !self.auto_play {
            return;
        }
        let Some(state) = self.session.run_state() else {
            self.auto_play = false;
            return;
        };

        let policy = RetreatPolicy::BelowFraction(AUTO_RETREAT_FRACTION);
        if state.phase == RunPhase::EncounterResult
            && policy.should_retreat(state, self.run_start_health)
        {
            self.retreat();
        } else {
            self.step();
        }
    }

    // === Helpers ===

    /// Show an error in the status line; true on success
    fn report(&mut self, result: Result<(), SessionError>) -> bool {
        match result {
            Ok(()) => {
                self.status = None;
                true
            }
            Err(err) => {
                log::warn!("{}", err);
                self.status = Some(err.to_string());
                false
            }
        }
    }

    fn after_action(&mut self) {
        if !self.session.in_run() && self.screen == Screen::Run {
            self.auto_play = false;
            self.screen = Screen::Summary;
        }
        self.auto_scroll();
    }

    fn auto_scroll(&mut self) {
        self.log_scroll = self.session.log.len().saturating_sub(15);
    }
}
