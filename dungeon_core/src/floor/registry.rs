//! FloorRegistry - Validated catalog of dungeon floors

use super::DungeonFloor;
use crate::config::{self, ConfigError};
use crate::types::{EncounterKind, FloorId};
use std::collections::BTreeSet;
use std::path::Path;

/// Ordered, validated set of floors
#[derive(Debug, Clone)]
pub struct FloorRegistry {
    floors: Vec<DungeonFloor>,
}

impl FloorRegistry {
    /// Build a registry, sorting by id and validating the prerequisite chain
    pub fn new(mut floors: Vec<DungeonFloor>) -> Result<Self, ConfigError> {
        floors.sort_by_key(|f| f.id);
        let registry = FloorRegistry { floors };
        registry.validate()?;
        Ok(registry)
    }

    /// The floors shipped with the crate
    pub fn builtin() -> Result<Self, ConfigError> {
        config::default_floors()
    }

    /// Load floors from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        config::load_floors(path)
    }

    /// Parse floors from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        config::parse_floors(content)
    }

    pub fn get(&self, id: FloorId) -> Option<&DungeonFloor> {
        self.floors.iter().find(|f| f.id == id)
    }

    pub fn floors(&self) -> &[DungeonFloor] {
        &self.floors
    }

    pub fn len(&self) -> usize {
        self.floors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }

    /// Lowest floor that has not been cleared yet
    pub fn next_floor(&self, floors_cleared: &BTreeSet<FloorId>) -> Option<&DungeonFloor> {
        self.floors.iter().find(|f| !floors_cleared.contains(&f.id))
    }

    /// Check the linear prerequisite chain and per-floor sanity
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.floors.is_empty() {
            return Err(invalid("no floors defined".to_string()));
        }

        for (position, floor) in self.floors.iter().enumerate() {
            let expected_id = position as FloorId + 1;
            if floor.id != expected_id {
                return Err(invalid(format!(
                    "floor ids must run 1..=N without gaps, found {} at position {}",
                    floor.id, expected_id
                )));
            }
            if floor.requirements.previous_floor != floor.id - 1 {
                return Err(invalid(format!(
                    "floor {} must require floor {} (found {})",
                    floor.id,
                    floor.id - 1,
                    floor.requirements.previous_floor
                )));
            }
            validate_floor(floor)?;
        }

        Ok(())
    }
}

fn validate_floor(floor: &DungeonFloor) -> Result<(), ConfigError> {
    let id = floor.id;

    if !floor.gold_range.is_valid() {
        return Err(invalid(format!("floor {id}: gold_range min exceeds max")));
    }
    if !floor.health_risk_range.is_valid() {
        return Err(invalid(format!("floor {id}: health_risk_range min exceeds max")));
    }
    if !(0.0..=1.0).contains(&floor.mini_boss_chance) {
        return Err(invalid(format!("floor {id}: mini_boss_chance must be within 0..=1")));
    }
    if !(0.0..=1.0).contains(&floor.rare_drop.drop_chance) {
        return Err(invalid(format!("floor {id}: rare drop chance must be within 0..=1")));
    }
    if floor.boss_damage_multiplier < 1.0 || floor.mini_boss_damage_multiplier < 1.0 {
        return Err(invalid(format!("floor {id}: boss damage multipliers must be >= 1")));
    }
    if floor.boss.base_power == 0 {
        return Err(invalid(format!("floor {id}: boss base_power must be positive")));
    }
    if floor.mini_boss_chance > 0.0 && floor.mini_boss.is_none() {
        return Err(invalid(format!("floor {id}: mini_boss_chance set without a mini_boss")));
    }
    if let Some(mini) = &floor.mini_boss {
        if mini.power == 0 {
            return Err(invalid(format!("floor {id}: mini-boss power must be positive")));
        }
    }
    if floor.encounters.is_empty() {
        return Err(invalid(format!("floor {id}: encounter pool is empty")));
    }
    for template in &floor.encounters {
        if !matches!(template.kind, EncounterKind::Normal | EncounterKind::Trap) {
            return Err(invalid(format!(
                "floor {id}: pool entry '{}' must be normal or trap",
                template.name
            )));
        }
        if template.power == 0 {
            return Err(invalid(format!(
                "floor {id}: pool entry '{}' needs a positive power",
                template.name
            )));
        }
    }
    if floor.min_time_cost == 0 || floor.min_time_cost > floor.base_time_cost {
        return Err(invalid(format!(
            "floor {id}: min_time_cost must be between 1 and base_time_cost"
        )));
    }

    Ok(())
}

fn invalid(message: String) -> ConfigError {
    ConfigError::ValidationError(message)
}
