//! Dungeon floors - static floor data, requirements and time costs

mod registry;
mod requirements;
mod time;

pub use registry::FloorRegistry;
pub use requirements::{check_floor_requirements, recommended_gear_hints, FloorEligibility};
pub use time::{get_encounter_time_cost, get_floor_time_cost};

use crate::constants::DEFAULT_RARE_DROP_CHANCE;
use crate::types::{Degree, EncounterKind, FloorId};
use serde::{Deserialize, Serialize};

/// One level of the dungeon
/// Loaded from TOML configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonFloor {
    /// Floor number, starting at 1
    pub id: FloorId,
    /// Display name
    pub name: String,
    #[serde(default)]
    pub description: String,

    // === Boss & Loot ===
    pub boss: Boss,
    pub rare_drop: RareDrop,
    /// Gold rolled per won encounter, before multipliers
    pub gold_range: RollRange,
    /// Damage rolled per encounter, before scaling and mitigation
    pub health_risk_range: RollRange,
    /// Happiness granted the first time the boss falls
    pub happiness_on_clear: i32,

    // === Entry ===
    #[serde(default)]
    pub requirements: FloorRequirements,

    // === Encounter Sequence ===
    /// Number of regular encounters before the boss
    pub normal_encounters: u32,
    /// Pool the regular encounters are drawn from
    pub encounters: Vec<EncounterTemplate>,
    /// Optional mini-boss inserted mid-floor
    #[serde(default)]
    pub mini_boss: Option<MonsterTemplate>,
    /// Chance (0.0 to 1.0) that the mini-boss shows up in a run
    #[serde(default)]
    pub mini_boss_chance: f64,
    /// Damage scaling for the boss encounter
    #[serde(default = "default_boss_damage_multiplier")]
    pub boss_damage_multiplier: f64,
    /// Damage scaling for the mini-boss encounter
    #[serde(default = "default_mini_boss_damage_multiplier")]
    pub mini_boss_damage_multiplier: f64,

    // === Time ===
    /// Hours to clear the floor with no gear
    pub base_time_cost: u32,
    /// Floor on the time cost, however well equipped
    pub min_time_cost: u32,
}

fn default_boss_damage_multiplier() -> f64 {
    1.5
}
fn default_mini_boss_damage_multiplier() -> f64 {
    1.25
}

impl DungeonFloor {
    /// Whether the given cleared set unlocks this floor's prerequisite
    pub fn prerequisite_met(&self, floors_cleared: &std::collections::BTreeSet<FloorId>) -> bool {
        self.requirements.previous_floor == 0
            || floors_cleared.contains(&self.requirements.previous_floor)
    }

    /// Number of encounters a run has without a mini-boss
    pub fn planned_encounters(&self) -> usize {
        self.normal_encounters as usize + 1
    }
}

/// The floor's final encounter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boss {
    pub name: String,
    /// Power the player's attack is measured against
    pub base_power: u32,
}

/// Item the floor boss can drop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RareDrop {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_drop_chance")]
    pub drop_chance: f64,
}

fn default_drop_chance() -> f64 {
    DEFAULT_RARE_DROP_CHANCE
}

/// Inclusive integer range for rolls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRange {
    pub min: u32,
    pub max: u32,
}

impl RollRange {
    pub fn new(min: u32, max: u32) -> Self {
        RollRange { min, max }
    }

    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }
}

/// What a player needs before entering a floor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FloorRequirements {
    /// Floor that must be cleared first (0 = none)
    #[serde(default)]
    pub previous_floor: FloorId,
    /// Degrees that help on this floor (hints only)
    #[serde(default)]
    pub recommended_degrees: Vec<Degree>,
    #[serde(default)]
    pub requires_weapon: bool,
    #[serde(default)]
    pub requires_armor: bool,
    #[serde(default)]
    pub min_attack: u32,
    #[serde(default)]
    pub min_defense: u32,
}

/// Regular encounter in a floor's pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterTemplate {
    pub name: String,
    /// Only `normal` and `trap` are valid in a pool
    #[serde(default = "default_template_kind")]
    pub kind: EncounterKind,
    pub power: u32,
    /// Ethereal monsters shrug off untrained attacks
    #[serde(default)]
    pub ethereal: bool,
}

fn default_template_kind() -> EncounterKind {
    EncounterKind::Normal
}

/// A named monster with a power rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterTemplate {
    pub name: String,
    pub power: u32,
    #[serde(default)]
    pub ethereal: bool,
}
