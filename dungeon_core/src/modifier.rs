//! Dungeon modifiers - optional run-wide effects rolled at run start

use crate::constants::MODIFIER_CHANCE;
use crate::rng::DungeonRng;
use serde::{Deserialize, Serialize};

/// A run-wide effect; at most one is active per run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonModifier {
    pub id: String,
    pub name: String,
    pub icon: String,
    /// Display color name understood by the front end
    pub color: String,
    pub description: String,
    /// Multiplier on gold found
    pub gold_multiplier: f64,
    /// Multiplier on damage taken
    pub damage_multiplier: f64,
    /// Multiplier on the floor's rare drop chance
    pub rare_drop_multiplier: f64,
}

impl DungeonModifier {
    fn new(id: &str, name: &str, icon: &str, color: &str, description: &str) -> Self {
        DungeonModifier {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
            description: description.to_string(),
            gold_multiplier: 1.0,
            damage_multiplier: 1.0,
            rare_drop_multiplier: 1.0,
        }
    }

    fn with_gold(mut self, multiplier: f64) -> Self {
        self.gold_multiplier = multiplier;
        self
    }

    fn with_damage(mut self, multiplier: f64) -> Self {
        self.damage_multiplier = multiplier;
        self
    }

    fn with_rare_drop(mut self, multiplier: f64) -> Self {
        self.rare_drop_multiplier = multiplier;
        self
    }
}

/// Every modifier a run can roll
pub fn builtin_modifiers() -> Vec<DungeonModifier> {
    vec![
        DungeonModifier::new(
            "treasure_trove",
            "Treasure Trove",
            "$",
            "yellow",
            "Coins glitter in every corner. +50% gold.",
        )
        .with_gold(1.5),
        DungeonModifier::new(
            "cursed_halls",
            "Cursed Halls",
            "☠",
            "magenta",
            "A curse sharpens every blade. +25% damage taken, +25% gold.",
        )
        .with_damage(1.25)
        .with_gold(1.25),
        DungeonModifier::new(
            "blessed_ground",
            "Blessed Ground",
            "✚",
            "green",
            "Old wards still hold. -20% damage taken.",
        )
        .with_damage(0.8),
        DungeonModifier::new(
            "blood_moon",
            "Blood Moon",
            "☾",
            "red",
            "Monsters are frenzied and fat with loot. +50% damage taken, double gold.",
        )
        .with_damage(1.5)
        .with_gold(2.0),
        DungeonModifier::new(
            "lucky_stars",
            "Lucky Stars",
            "★",
            "cyan",
            "Fortune smiles on the bold. Double rare drop chance.",
        )
        .with_rare_drop(2.0),
    ]
}

/// Roll at most one modifier for a run
pub fn roll_modifier(
    modifiers: &[DungeonModifier],
    rng: &mut impl DungeonRng,
) -> Option<DungeonModifier> {
    if modifiers.is_empty() || !rng.roll_chance(MODIFIER_CHANCE) {
        return None;
    }
    modifiers.get(rng.roll_index(modifiers.len())).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRolls;

    #[test]
    fn test_builtin_modifiers_unique() {
        let modifiers = builtin_modifiers();
        let mut ids: Vec<_> = modifiers.iter().map(|m| m.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), modifiers.len());
        assert!(modifiers.iter().all(|m| m.gold_multiplier > 0.0));
    }

    #[test]
    fn test_no_modifier_when_roll_fails() {
        let mut rng = ScriptedRolls::low();
        assert!(roll_modifier(&builtin_modifiers(), &mut rng).is_none());
    }

    #[test]
    fn test_modifier_when_roll_succeeds() {
        let mut rng = ScriptedRolls::high().with_units([0.0]);
        let modifier = roll_modifier(&builtin_modifiers(), &mut rng).unwrap();
        assert_eq!(modifier.id, "lucky_stars");
    }

    #[test]
    fn test_empty_table() {
        let mut rng = ScriptedRolls::low().with_fallback_unit(0.0);
        assert!(roll_modifier(&[], &mut rng).is_none());
    }
}
