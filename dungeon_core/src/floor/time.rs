//! Time cost of moving through a floor
//!
//! Better equipped adventurers move faster: every `TIME_REDUCTION_DIVISOR`
//! points of combined attack and defense shave an hour off the floor's base
//! cost, down to the floor's minimum.

use super::DungeonFloor;
use crate::constants::TIME_REDUCTION_DIVISOR;
use crate::stats::CombatStats;

/// Hours needed to play through the whole floor
pub fn get_floor_time_cost(floor: &DungeonFloor, stats: &CombatStats) -> u32 {
    let reduction = stats.attack.saturating_add(stats.defense) / TIME_REDUCTION_DIVISOR;
    floor
        .base_time_cost
        .saturating_sub(reduction)
        .max(floor.min_time_cost)
}

/// Hours charged each time the player moves on to the next encounter
///
/// The floor cost is spread across the run's encounters, rounded up.
pub fn get_encounter_time_cost(
    floor: &DungeonFloor,
    stats: &CombatStats,
    encounter_count: usize,
) -> u32 {
    let total = get_floor_time_cost(floor, stats);
    if encounter_count == 0 {
        return total;
    }
    total.div_ceil(encounter_count as u32).max(1)
}
