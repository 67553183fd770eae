//! Encounter resolution - roll one encounter against the player's stats

use super::result::{EncounterEvent, EncounterResult};
use super::Encounter;
use crate::constants::{
    BOSS_GOLD_MULTIPLIER, ETHEREAL_PENALTY, MINI_BOSS_GOLD_MULTIPLIER, MIN_COMBAT_EFFICIENCY,
    MIN_DEFENSE_FACTOR, POTION_HEAL_AMOUNT, TRAP_DISARM_CHANCE, TRAP_GOLD_LOSS_FRACTION,
};
use crate::floor::DungeonFloor;
use crate::modifier::DungeonModifier;
use crate::rng::DungeonRng;
use crate::stats::{CombatStats, EducationBonuses};
use crate::types::EncounterKind;

/// Resolve one encounter (immutable API)
///
/// Rolls are drawn in a fixed order so a seeded source replays exactly:
/// 1. Damage roll in the floor's health risk range, scaled by encounter kind,
///    defense and the run modifier
/// 2. Trap disarm (traps only, needs `can_disarm_traps`)
/// 3. Block (zeroes the hit)
/// 4. Education damage reduction
/// 5. Gold roll, or gold lost to a sprung trap
/// 6. Rare drop (eligible encounters only)
/// 7. Healing potion
///
/// Gold, rare drops and potions only happen when the player survives.
pub fn resolve_encounter(
    floor: &DungeonFloor,
    encounter: &Encounter,
    stats: &CombatStats,
    education: &EducationBonuses,
    current_health: i32,
    modifier: Option<&DungeonModifier>,
    rng: &mut impl DungeonRng,
) -> EncounterResult {
    let mut result = EncounterResult::new(encounter);
    result.health_before = current_health;

    // Step 1: Incoming damage
    let roll = rng.roll_range(floor.health_risk_range.min, floor.health_risk_range.max) as f64;
    let kind_scale = match encounter.kind {
        EncounterKind::MiniBoss => floor.mini_boss_damage_multiplier,
        EncounterKind::Boss => floor.boss_damage_multiplier,
        EncounterKind::Normal | EncounterKind::Trap => 1.0,
    };
    let modifier_scale = modifier.map_or(1.0, |m| m.damage_multiplier);
    let incoming =
        roll * kind_scale * defense_factor(encounter.power, stats.defense) * modifier_scale;

    // Step 2: Trap disarm
    let is_trap = encounter.kind == EncounterKind::Trap;
    let disarmed = is_trap && education.can_disarm_traps && rng.roll_chance(TRAP_DISARM_CHANCE);

    let mut damage = incoming;
    if disarmed {
        result.damage_avoided = incoming.round() as i32;
        result.events.push(EncounterEvent::TrapDisarmed);
        damage = 0.0;
    } else if rng.roll_chance(stats.block_chance) {
        // Step 3: Block
        let amount = incoming.round() as i32;
        result.damage_avoided = amount;
        result.events.push(EncounterEvent::Blocked { amount });
        damage = 0.0;
    }

    // Step 4: Damage reduction from training
    damage *= 1.0 - education.damage_reduction;
    result.damage_taken = damage.round().max(0.0) as i32;

    let health_after_hit = (current_health - result.damage_taken).max(0);
    result.is_killing_blow = health_after_hit == 0;
    result.health_after = health_after_hit;

    if result.is_killing_blow {
        return result;
    }

    // Step 5: Gold
    if is_trap {
        if !disarmed {
            let roll = rng.roll_range(floor.gold_range.min, floor.gold_range.max) as f64;
            let gold_lost = (roll * TRAP_GOLD_LOSS_FRACTION).floor() as i32;
            result.gold_gained = -gold_lost;
            result.events.push(EncounterEvent::TrapSprung { gold_lost });
        }
    } else {
        if encounter.ethereal && !education.can_damage_ethereal {
            result.events.push(EncounterEvent::EtherealResisted);
        }
        let roll = rng.roll_range(floor.gold_range.min, floor.gold_range.max) as f64;
        let kind_gold = match encounter.kind {
            EncounterKind::MiniBoss => MINI_BOSS_GOLD_MULTIPLIER,
            EncounterKind::Boss => BOSS_GOLD_MULTIPLIER,
            EncounterKind::Normal | EncounterKind::Trap => 1.0,
        };
        let modifier_gold = modifier.map_or(1.0, |m| m.gold_multiplier);
        let gold = roll
            * combat_efficiency(encounter, stats, education)
            * kind_gold
            * (1.0 + education.gold_bonus)
            * modifier_gold;
        result.gold_gained = gold.floor().max(0.0) as i32;
    }

    // Step 6: Rare drop
    if encounter.rare_drop_eligible {
        let rare_scale = modifier.map_or(1.0, |m| m.rare_drop_multiplier);
        let chance = (floor.rare_drop.drop_chance * rare_scale).min(1.0);
        if rng.roll_chance(chance) {
            result.rare_drop = Some(floor.rare_drop.name.clone());
        }
    }

    // Step 7: Healing potion, never more than the hit just taken
    if result.damage_taken > 0 && rng.roll_chance(education.healing_potion_chance) {
        let amount = POTION_HEAL_AMOUNT.min(result.damage_taken);
        result.healed = amount;
        result.health_after += amount;
        result.events.push(EncounterEvent::PotionHealed { amount });
    }

    result
}

/// How well the player's attack holds up against the encounter (0.0 to 1.0)
///
/// Attack (with the education bonus) over monster power, clamped to
/// `[MIN_COMBAT_EFFICIENCY, 1.0]`. Untrained attacks against ethereal foes
/// keep only `ETHEREAL_PENALTY` of that.
pub fn combat_efficiency(
    encounter: &Encounter,
    stats: &CombatStats,
    education: &EducationBonuses,
) -> f64 {
    let attack = stats.attack as f64 * (1.0 + education.attack_bonus);
    let power = encounter.power.max(1) as f64;
    let efficiency = (attack / power).clamp(MIN_COMBAT_EFFICIENCY, 1.0);

    if encounter.ethereal && !education.can_damage_ethereal {
        efficiency * ETHEREAL_PENALTY
    } else {
        efficiency
    }
}

/// Fraction of a hit that gets past the player's defense
fn defense_factor(power: u32, defense: u32) -> f64 {
    let power = power.max(1) as f64;
    (power / (power + defense as f64)).max(MIN_DEFENSE_FACTOR)
}
