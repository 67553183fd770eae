//! Equipment catalog - base stats of every item the player can equip

use crate::config::{self, ConfigError};
use crate::types::EquipmentSlot;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// A weapon, armor piece or shield
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentItem {
    pub id: String,
    pub name: String,
    pub slot: EquipmentSlot,
    #[serde(default)]
    pub attack: u32,
    #[serde(default)]
    pub defense: u32,
    /// Chance (0.0 to 1.0) to block an incoming hit
    #[serde(default)]
    pub block_chance: f64,
}

/// Lookup table of equipment by id
#[derive(Debug, Clone, Default)]
pub struct EquipmentCatalog {
    items: HashMap<String, EquipmentItem>,
}

impl EquipmentCatalog {
    /// Build a catalog, rejecting duplicate ids and out-of-range block chances
    pub fn new(items: Vec<EquipmentItem>) -> Result<Self, ConfigError> {
        let mut map = HashMap::new();
        for item in items {
            if !(0.0..=1.0).contains(&item.block_chance) {
                return Err(ConfigError::ValidationError(format!(
                    "item '{}': block_chance must be within 0..=1",
                    item.id
                )));
            }
            if map.contains_key(&item.id) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate item id '{}'",
                    item.id
                )));
            }
            map.insert(item.id.clone(), item);
        }
        Ok(EquipmentCatalog { items: map })
    }

    /// The equipment shipped with the crate
    pub fn builtin() -> Result<Self, ConfigError> {
        config::default_equipment()
    }

    /// Load equipment from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        config::load_equipment(path)
    }

    pub fn get(&self, id: &str) -> Option<&EquipmentItem> {
        self.items.get(id)
    }

    /// Items for one slot, weakest first
    pub fn items_for_slot(&self, slot: EquipmentSlot) -> Vec<&EquipmentItem> {
        let mut items: Vec<_> = self.items.values().filter(|i| i.slot == slot).collect();
        items.sort_by_key(|i| (i.attack + i.defense, i.id.clone()));
        items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = EquipmentCatalog::builtin().unwrap();
        assert!(!catalog.is_empty());

        let sword = catalog.get("iron_sword").unwrap();
        assert_eq!(sword.slot, EquipmentSlot::Weapon);
        assert!(sword.attack > 0);

        for slot in EquipmentSlot::all() {
            assert!(!catalog.items_for_slot(*slot).is_empty(), "no items for {:?}", slot);
        }
    }

    #[test]
    fn test_items_for_slot_sorted() {
        let catalog = EquipmentCatalog::builtin().unwrap();
        let weapons = catalog.items_for_slot(EquipmentSlot::Weapon);
        for pair in weapons.windows(2) {
            assert!(pair[0].attack + pair[0].defense <= pair[1].attack + pair[1].defense);
        }
    }

    #[test]
    fn test_rejects_duplicates() {
        let item = EquipmentItem {
            id: "stick".to_string(),
            name: "Stick".to_string(),
            slot: EquipmentSlot::Weapon,
            attack: 1,
            defense: 0,
            block_chance: 0.0,
        };
        assert!(EquipmentCatalog::new(vec![item.clone(), item]).is_err());
    }
}
