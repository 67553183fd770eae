//! Education bonuses - combat perks granted by completed degrees

use crate::constants::MAX_DAMAGE_REDUCTION;
use crate::types::Degree;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Dungeon perks derived from a player's degrees
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationBonuses {
    pub can_disarm_traps: bool,
    pub can_damage_ethereal: bool,
    /// Fraction of incoming damage removed (0.0 to below 1.0)
    pub damage_reduction: f64,
    /// Multiplicative bonus on attack (0.10 = +10%)
    pub attack_bonus: f64,
    /// Multiplicative bonus on gold found (0.10 = +10%)
    pub gold_bonus: f64,
    /// Chance (0.0 to 1.0) to drink a potion after taking a hit
    pub healing_potion_chance: f64,
}

impl EducationBonuses {
    /// Union of two bonus sets: flags OR, numbers add
    fn combine(self, other: EducationBonuses) -> EducationBonuses {
        EducationBonuses {
            can_disarm_traps: self.can_disarm_traps || other.can_disarm_traps,
            can_damage_ethereal: self.can_damage_ethereal || other.can_damage_ethereal,
            damage_reduction: self.damage_reduction + other.damage_reduction,
            attack_bonus: self.attack_bonus + other.attack_bonus,
            gold_bonus: self.gold_bonus + other.gold_bonus,
            healing_potion_chance: self.healing_potion_chance + other.healing_potion_chance,
        }
    }
}

/// Bonus table entry for a single degree
pub fn degree_bonuses(degree: Degree) -> EducationBonuses {
    let none = EducationBonuses::default();
    match degree {
        Degree::CombatTraining => EducationBonuses {
            damage_reduction: 0.10,
            attack_bonus: 0.10,
            ..none
        },
        Degree::MasterCombat => EducationBonuses {
            damage_reduction: 0.15,
            attack_bonus: 0.20,
            ..none
        },
        Degree::ArcaneStudies => EducationBonuses {
            can_damage_ethereal: true,
            attack_bonus: 0.05,
            ..none
        },
        Degree::Alchemy => EducationBonuses {
            healing_potion_chance: 0.20,
            ..none
        },
        Degree::Scholar => EducationBonuses {
            can_disarm_traps: true,
            ..none
        },
        Degree::Loremaster => EducationBonuses {
            can_disarm_traps: true,
            can_damage_ethereal: true,
            gold_bonus: 0.10,
            ..none
        },
        Degree::Commerce => EducationBonuses {
            gold_bonus: 0.15,
            ..none
        },
        Degree::TradeGuild | Degree::JuniorAcademy => none,
    }
}

/// Combine the bonuses of every completed degree
pub fn calculate_education_bonuses(completed_degrees: &BTreeSet<Degree>) -> EducationBonuses {
    let total = completed_degrees
        .iter()
        .map(|d| degree_bonuses(*d))
        .fold(EducationBonuses::default(), EducationBonuses::combine);

    EducationBonuses {
        damage_reduction: total.damage_reduction.clamp(0.0, MAX_DAMAGE_REDUCTION),
        healing_potion_chance: total.healing_potion_chance.clamp(0.0, 1.0),
        ..total
    }
}
