//! Floor configuration loading

use super::ConfigError;
use crate::floor::{DungeonFloor, FloorRegistry};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container for floor configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorsConfig {
    #[serde(rename = "floors")]
    pub floors: Vec<DungeonFloor>,
}

/// Load floor configurations from a TOML file
pub fn load_floors(path: &Path) -> Result<FloorRegistry, ConfigError> {
    let config: FloorsConfig = super::load_toml(path)?;
    FloorRegistry::new(config.floors)
}

/// Load floor configurations from a TOML string
pub fn parse_floors(content: &str) -> Result<FloorRegistry, ConfigError> {
    let config: FloorsConfig = super::parse_toml(content)?;
    FloorRegistry::new(config.floors)
}

/// Get the builtin floor configurations
pub fn default_floors() -> Result<FloorRegistry, ConfigError> {
    let toml = include_str!("../../config/floors.toml");
    parse_floors(toml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Degree, EncounterKind};

    const SINGLE_FLOOR: &str = r#"
[[floors]]
id = 1
name = "Cellar"
description = "A damp cellar"
gold_range = { min = 5, max = 10 }
health_risk_range = { min = 2, max = 4 }
happiness_on_clear = 3
normal_encounters = 2
base_time_cost = 4
min_time_cost = 2

[floors.boss]
name = "Rat King"
base_power = 8

[floors.rare_drop]
id = "rat_crown"
name = "Rat Crown"

[floors.requirements]
recommended_degrees = ["combat_training"]

[[floors.encounters]]
name = "Rat"
power = 3

[[floors.encounters]]
name = "Loose Brick"
kind = "trap"
power = 4
"#;

    #[test]
    fn test_parse_floors() {
        let registry = parse_floors(SINGLE_FLOOR).unwrap();
        let floor = registry.get(1).unwrap();

        assert_eq!(floor.name, "Cellar");
        assert_eq!(floor.boss.base_power, 8);
        assert_eq!(floor.encounters[1].kind, EncounterKind::Trap);
        assert_eq!(floor.requirements.recommended_degrees, vec![Degree::CombatTraining]);
        // defaults
        assert!((floor.rare_drop.drop_chance - 0.05).abs() < f64::EPSILON);
        assert!((floor.boss_damage_multiplier - 1.5).abs() < f64::EPSILON);
        assert!(floor.mini_boss.is_none());
        assert_eq!(floor.requirements.previous_floor, 0);
    }

    #[test]
    fn test_parse_rejects_bad_toml() {
        let err = parse_floors("[[floors]]\nid = \"one\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_floors(Path::new("definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }

    #[test]
    fn test_default_floors_loads_all() {
        let registry = default_floors().unwrap();
        assert_eq!(registry.len(), 5, "Expected 5 floors from config");
    }
}
