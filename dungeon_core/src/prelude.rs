//! Prelude module for convenient imports
//!
//! ```rust
//! use dungeon_core::prelude::*;
//! ```

// Core types
pub use crate::types::{Degree, EncounterKind, EquipmentSlot, FloorId, GuildRank};

// Floors
pub use crate::floor::{check_floor_requirements, get_floor_time_cost, DungeonFloor, FloorRegistry};

// Stats
pub use crate::equipment::EquipmentCatalog;
pub use crate::stats::{calculate_combat_stats, calculate_education_bonuses, CombatStats, EducationBonuses};

// Runs
pub use crate::encounter::{EncounterEvent, EncounterResult};
pub use crate::rng::{DungeonRng, RngSource};
pub use crate::run::{
    advance_to_next_encounter, can_retreat, end_run_on_death, end_run_out_of_time,
    fight_current_encounter, init_dungeon_run, retreat_from_dungeon, DungeonRunState, RunError,
    RunPhase,
};

// Rewards
pub use crate::reward::{finalize_run, RunOutcome, RunResult};
pub use crate::progress::{get_dungeon_progress, DungeonRecords};
