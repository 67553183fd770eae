//! Dungeon runs - one attempt at a floor, from entry to floor summary
//!
//! A run is inert data. Every transition takes the current
//! [`DungeonRunState`] by reference and returns a new one.

mod error;
mod transition;

pub use error::RunError;
pub use transition::{
    advance_to_next_encounter, apply_encounter_result, build_encounter_sequence, can_retreat,
    check_retreat, end_run_on_death, end_run_out_of_time, fight_current_encounter,
    init_dungeon_run, retreat_from_dungeon,
};

use crate::encounter::{Encounter, EncounterResult};
use crate::modifier::DungeonModifier;
use crate::types::FloorId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a run is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    /// Waiting for the player to fight the current encounter
    EncounterIntro,
    /// Showing the last result, waiting for continue or retreat
    EncounterResult,
    /// Terminal
    FloorSummary,
}

impl RunPhase {
    pub fn name(&self) -> &'static str {
        match self {
            RunPhase::EncounterIntro => "encounter intro",
            RunPhase::EncounterResult => "encounter result",
            RunPhase::FloorSummary => "floor summary",
        }
    }

    pub fn is_terminal(&self) -> bool {
        *self == RunPhase::FloorSummary
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// State of a single dungeon run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonRunState {
    pub floor_id: FloorId,
    pub phase: RunPhase,

    // === Sequence ===
    /// Fixed at init: normals, an optional mini-boss, the boss last
    pub encounters: Vec<Encounter>,
    pub current_encounter_index: usize,

    // === Running Totals ===
    /// Shadow of the player's health; the caller's store is authoritative
    pub current_health: i32,
    /// Gold found so far, never below zero
    pub total_gold: i32,
    pub total_damage: i32,
    pub total_healed: i32,
    pub results: Vec<EncounterResult>,

    // === Flags ===
    pub modifier: Option<DungeonModifier>,
    pub has_mini_boss: bool,
    pub boss_defeated: bool,
    pub retreated: bool,
    /// Set when the run ended because the player ran out of time
    pub out_of_time: bool,
    /// Captured at init and fixed for the run
    pub is_first_clear: bool,
    pub rare_drop_name: Option<String>,
}

impl DungeonRunState {
    /// Encounter at the current index, if any
    pub fn current_encounter(&self) -> Option<&Encounter> {
        self.encounters.get(self.current_encounter_index)
    }

    /// The encounter the player would face next
    ///
    /// In the intro phase that is the current encounter, after a result it is
    /// the following one. A finished run has none.
    pub fn upcoming_encounter(&self) -> Option<&Encounter> {
        match self.phase {
            RunPhase::EncounterIntro => self.current_encounter(),
            RunPhase::EncounterResult => self.encounters.get(self.current_encounter_index + 1),
            RunPhase::FloorSummary => None,
        }
    }

    pub fn last_result(&self) -> Option<&EncounterResult> {
        self.results.last()
    }

    pub fn encounters_completed(&self) -> usize {
        self.results.len()
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Ended without beating the boss and without retreating
    pub fn is_defeat(&self) -> bool {
        self.is_finished() && !self.boss_defeated && !self.retreated
    }

    /// Health change the run has caused so far
    pub fn net_health_change(&self) -> i32 {
        self.total_healed - self.total_damage
    }
}
