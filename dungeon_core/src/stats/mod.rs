//! Combat stat resolution - effective attack, defense and block from gear

mod education;

pub use education::{calculate_education_bonuses, degree_bonuses, EducationBonuses};

use crate::constants::{
    MAX_BLOCK_CHANCE, TEMPER_ARMOR_DEFENSE, TEMPER_SHIELD_BLOCK, TEMPER_SHIELD_DEFENSE,
    TEMPER_WEAPON_ATTACK, WORN_DURABILITY_THRESHOLD, WORN_ITEM_FACTOR,
};
use crate::equipment::{EquipmentCatalog, EquipmentItem};
use crate::types::EquipmentSlot;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Effective combat numbers for a player
///
/// Derived from equipment every time they are needed, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatStats {
    pub attack: u32,
    pub defense: u32,
    /// Chance (0.0 to 1.0) to block an incoming hit entirely
    pub block_chance: f64,
}

/// Sum equipped item stats, temper bonuses and durability penalties
///
/// Items present in `tempered_item_ids` gain the per-slot temper bonus.
/// When `durability` is given, worn items (at or below the worn threshold)
/// contribute half and broken items (0) contribute nothing. Items missing from
/// the durability map count as pristine. Unknown ids and items equipped in the
/// wrong slot are ignored.
pub fn calculate_combat_stats(
    catalog: &EquipmentCatalog,
    weapon: Option<&str>,
    armor: Option<&str>,
    shield: Option<&str>,
    tempered_item_ids: &BTreeSet<String>,
    durability: Option<&HashMap<String, u32>>,
) -> CombatStats {
    let mut attack = 0.0;
    let mut defense = 0.0;
    let mut block_chance = 0.0;

    let equipped = [
        (EquipmentSlot::Weapon, weapon),
        (EquipmentSlot::Armor, armor),
        (EquipmentSlot::Shield, shield),
    ];

    for (slot, id) in equipped {
        let Some(item) = id.and_then(|id| lookup(catalog, slot, id)) else {
            continue;
        };

        let tempered = tempered_item_ids.contains(&item.id);
        let (item_attack, item_defense, item_block) = item_contribution(item, tempered);
        let factor = condition_factor(durability.and_then(|d| d.get(&item.id)).copied());

        attack += item_attack as f64 * factor;
        defense += item_defense as f64 * factor;
        block_chance += item_block * factor;
    }

    CombatStats {
        attack: attack.floor() as u32,
        defense: defense.floor() as u32,
        block_chance: block_chance.clamp(0.0, MAX_BLOCK_CHANCE),
    }
}

fn lookup<'a>(catalog: &'a EquipmentCatalog, slot: EquipmentSlot, id: &str) -> Option<&'a EquipmentItem> {
    match catalog.get(id) {
        Some(item) if item.slot == slot => Some(item),
        Some(item) => {
            log::warn!(
                "item '{}' is a {} but was equipped as {}",
                item.id,
                item.slot.name(),
                slot.name()
            );
            None
        }
        None => {
            log::warn!("unknown equipment id '{}'", id);
            None
        }
    }
}

/// Base stats plus temper bonus for the item's slot
fn item_contribution(item: &EquipmentItem, tempered: bool) -> (u32, u32, f64) {
    let mut attack = item.attack;
    let mut defense = item.defense;
    let mut block = item.block_chance;

    if tempered {
        match item.slot {
            EquipmentSlot::Weapon => attack += TEMPER_WEAPON_ATTACK,
            EquipmentSlot::Armor => defense += TEMPER_ARMOR_DEFENSE,
            EquipmentSlot::Shield => {
                defense += TEMPER_SHIELD_DEFENSE;
                block += TEMPER_SHIELD_BLOCK;
            }
        }
    }

    (attack, defense, block)
}

fn condition_factor(durability: Option<u32>) -> f64 {
    match durability {
        None => 1.0,
        Some(0) => 0.0,
        Some(d) if d <= WORN_DURABILITY_THRESHOLD => WORN_ITEM_FACTOR,
        Some(_) => 1.0,
    }
}
