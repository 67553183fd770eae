//! Equipment configuration loading

use super::ConfigError;
use crate::equipment::{EquipmentCatalog, EquipmentItem};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container for equipment configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentConfig {
    #[serde(rename = "items")]
    pub items: Vec<EquipmentItem>,
}

/// Load equipment from a TOML file
pub fn load_equipment(path: &Path) -> Result<EquipmentCatalog, ConfigError> {
    let config: EquipmentConfig = super::load_toml(path)?;
    EquipmentCatalog::new(config.items)
}

/// Load equipment from a TOML string
pub fn parse_equipment(content: &str) -> Result<EquipmentCatalog, ConfigError> {
    let config: EquipmentConfig = super::parse_toml(content)?;
    EquipmentCatalog::new(config.items)
}

/// Get the builtin equipment
pub fn default_equipment() -> Result<EquipmentCatalog, ConfigError> {
    let toml = include_str!("../../config/equipment.toml");
    parse_equipment(toml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EquipmentSlot;

    #[test]
    fn test_parse_equipment() {
        let toml = r#"
[[items]]
id = "buckler"
name = "Buckler"
slot = "shield"
defense = 2
block_chance = 0.08
"#;

        let catalog = parse_equipment(toml).unwrap();
        let buckler = catalog.get("buckler").unwrap();
        assert_eq!(buckler.slot, EquipmentSlot::Shield);
        assert_eq!(buckler.attack, 0);
        assert!((buckler.block_chance - 0.08).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_block_chance_above_one() {
        let toml = r#"
[[items]]
id = "wall"
name = "Wall"
slot = "shield"
block_chance = 1.5
"#;
        assert!(matches!(
            parse_equipment(toml),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
