//! dungeon_core - Dungeon combat and progression engine
//!
//! This library provides:
//! - FloorRegistry: Static floor data, entry requirements and time costs
//! - CombatStats / EducationBonuses: Derived player stats for a run
//! - DungeonRunState: The run state machine and its transitions
//! - Encounter resolution: Damage, gold, traps and drops for one encounter
//! - RunResult: Final rewards and penalties of a run

pub mod config;
pub mod constants;
pub mod encounter;
pub mod equipment;
pub mod floor;
pub mod modifier;
pub mod prelude;
pub mod progress;
pub mod reward;
pub mod rng;
pub mod run;
pub mod stats;
pub mod types;

// Re-export core types for convenience
pub use config::{default_equipment, default_floors, ConfigError};
pub use encounter::{resolve_encounter, Encounter, EncounterEvent, EncounterResult};
pub use equipment::{EquipmentCatalog, EquipmentItem};
pub use floor::{
    check_floor_requirements, get_encounter_time_cost, get_floor_time_cost,
    recommended_gear_hints, DungeonFloor, FloorEligibility, FloorRegistry,
};
pub use modifier::{builtin_modifiers, DungeonModifier};
pub use progress::{get_dungeon_progress, DungeonProgress, DungeonRecords, FloorRecord};
pub use reward::{finalize_run, get_loot_multiplier, RunOutcome, RunResult};
pub use rng::{DungeonRng, RngSource, ScriptedRolls};
pub use run::{
    advance_to_next_encounter, apply_encounter_result, build_encounter_sequence, can_retreat,
    check_retreat, end_run_on_death, end_run_out_of_time, fight_current_encounter,
    init_dungeon_run, retreat_from_dungeon, DungeonRunState, RunError, RunPhase,
};
pub use stats::{calculate_combat_stats, calculate_education_bonuses, CombatStats, EducationBonuses};
pub use types::{Degree, EncounterKind, EquipmentSlot, FloorId, GuildRank};
