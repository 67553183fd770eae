//! Rewards and penalties - turn a finished run into player-facing deltas

use crate::constants::{
    DEFEAT_GOLD_FACTOR, DEFEAT_HAPPINESS_PENALTY, FLOOR_LOOT_STEP, RETREAT_GOLD_FACTOR,
};
use crate::floor::DungeonFloor;
use crate::run::{DungeonRunState, RunError, RunPhase};
use crate::types::{FloorId, GuildRank};
use serde::{Deserialize, Serialize};

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// Boss defeated
    Cleared,
    /// Left voluntarily
    Retreated,
    /// Forced out by the clock; no gold penalty
    OutOfTime,
    /// Health ran out before the boss fell
    Defeated,
}

impl RunOutcome {
    /// Classify a finished run
    pub fn from_state(state: &DungeonRunState) -> Self {
        if state.boss_defeated {
            RunOutcome::Cleared
        } else if state.out_of_time {
            RunOutcome::OutOfTime
        } else if state.retreated {
            RunOutcome::Retreated
        } else {
            RunOutcome::Defeated
        }
    }

    /// Share of the run's gold the player keeps
    pub fn penalty_factor(&self) -> f64 {
        match self {
            RunOutcome::Cleared | RunOutcome::OutOfTime => 1.0,
            RunOutcome::Retreated => RETREAT_GOLD_FACTOR,
            RunOutcome::Defeated => DEFEAT_GOLD_FACTOR,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RunOutcome::Cleared => "Floor cleared",
            RunOutcome::Retreated => "Retreated",
            RunOutcome::OutOfTime => "Out of time",
            RunOutcome::Defeated => "Defeated",
        }
    }
}

/// Final deltas of a run, for the caller to apply to the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub floor_id: FloorId,
    pub gold_earned: u32,
    /// Always 0: health is applied after every encounter
    pub health_change: i32,
    pub happiness_change: i32,
    /// True only for the run that first defeats the floor boss
    pub is_first_clear: bool,
    pub rare_drop_name: Option<String>,
    pub encounters_completed: usize,
    pub outcome: RunOutcome,
}

/// Gold scaling from floor depth and guild rank
pub fn get_loot_multiplier(floor: &DungeonFloor, rank: GuildRank) -> f64 {
    let depth = floor.id.saturating_sub(1) as f64;
    (1.0 + depth * FLOOR_LOOT_STEP) * (1.0 + rank.loot_bonus())
}

/// Compute the rewards of a finished run
///
/// `festival_gold_multiplier` is 1.0 outside festivals; negative values are
/// treated as 0.
pub fn finalize_run(
    state: &DungeonRunState,
    floor: &DungeonFloor,
    guild_rank: GuildRank,
    festival_gold_multiplier: f64,
) -> Result<RunResult, RunError> {
    if state.phase != RunPhase::FloorSummary {
        return Err(RunError::InvalidPhase {
            expected: RunPhase::FloorSummary,
            actual: state.phase,
        });
    }
    if floor.id != state.floor_id {
        return Err(RunError::FloorMismatch {
            expected: state.floor_id,
            actual: floor.id,
        });
    }

    let outcome = RunOutcome::from_state(state);
    let gold = state.total_gold.max(0) as f64
        * get_loot_multiplier(floor, guild_rank)
        * outcome.penalty_factor()
        * festival_gold_multiplier.max(0.0);
    let is_first_clear = state.is_first_clear && state.boss_defeated;

    let happiness_change = match outcome {
        RunOutcome::Cleared if is_first_clear => floor.happiness_on_clear,
        RunOutcome::Defeated => DEFEAT_HAPPINESS_PENALTY,
        _ => 0,
    };

    let result = RunResult {
        floor_id: floor.id,
        gold_earned: gold.floor() as u32,
        health_change: 0,
        happiness_change,
        is_first_clear,
        rare_drop_name: state.rare_drop_name.clone(),
        encounters_completed: state.encounters_completed(),
        outcome,
    };

    log::info!(
        "Floor {} finished: {} ({} gold, happiness {:+}, first clear: {})",
        floor.id,
        outcome.label(),
        result.gold_earned,
        result.happiness_change,
        result.is_first_clear
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floor::FloorRegistry;
    use crate::rng::ScriptedRolls;
    use crate::run::{
        advance_to_next_encounter, end_run_on_death, fight_current_encounter, init_dungeon_run,
        retreat_from_dungeon,
    };
    use crate::stats::{CombatStats, EducationBonuses};
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn strong() -> CombatStats {
        CombatStats {
            attack: 100,
            defense: 0,
            block_chance: 0.0,
        }
    }

    fn fight(
        state: &DungeonRunState,
        floor: &DungeonFloor,
        rng: &mut ScriptedRolls,
    ) -> DungeonRunState {
        fight_current_encounter(state, floor, &strong(), &EducationBonuses::default(), rng)
            .unwrap()
            .1
    }

    fn play_to_end(mut state: DungeonRunState, floor: &DungeonFloor) -> DungeonRunState {
        while !state.is_finished() {
            state = fight(&state, floor, &mut ScriptedRolls::low());
            state = if state.current_health <= 0 {
                end_run_on_death(&state).unwrap()
            } else {
                advance_to_next_encounter(&state).unwrap()
            };
        }
        state
    }

    fn summary_with_gold(total_gold: i32, boss_defeated: bool, retreated: bool) -> DungeonRunState {
        let registry = FloorRegistry::builtin().unwrap();
        let floor = registry.get(1).unwrap();
        let mut state =
            init_dungeon_run(floor, 100, true, &BTreeSet::new(), &mut ScriptedRolls::low());
        state.total_gold = total_gold;
        state.boss_defeated = boss_defeated;
        state.retreated = retreated;
        state.phase = RunPhase::FloorSummary;
        state
    }

    #[test]
    fn test_loot_multiplier() {
        let registry = FloorRegistry::builtin().unwrap();
        let first = registry.get(1).unwrap();
        let third = registry.get(3).unwrap();

        assert!((get_loot_multiplier(first, GuildRank::Novice) - 1.0).abs() < f64::EPSILON);
        assert!((get_loot_multiplier(third, GuildRank::Novice) - 1.2).abs() < 1e-9);
        assert!((get_loot_multiplier(first, GuildRank::Journeyman) - 1.1).abs() < 1e-9);

        for floor in registry.floors() {
            for pair in GuildRank::all().windows(2) {
                assert!(get_loot_multiplier(floor, pair[0]) <= get_loot_multiplier(floor, pair[1]));
            }
        }
    }

    #[test]
    fn test_scenario_clean_clear() {
        let registry = FloorRegistry::builtin().unwrap();
        let floor = registry.get(1).unwrap();
        let state = init_dungeon_run(floor, 100, true, &BTreeSet::new(), &mut ScriptedRolls::low());
        let state = play_to_end(state, floor);

        assert!(state.boss_defeated);
        assert!(!state.retreated);
        // Three rats at 10 gold, boss at 10 x 3
        assert_eq!(state.total_gold, 60);

        let rank = GuildRank::Adept;
        let result = finalize_run(&state, floor, rank, 1.0).unwrap();
        let expected = (60.0 * get_loot_multiplier(floor, rank)).floor() as u32;
        assert_eq!(result.outcome, RunOutcome::Cleared);
        assert!(result.is_first_clear);
        assert_eq!(result.happiness_change, floor.happiness_on_clear);
        assert_eq!(result.gold_earned, expected);
        assert_eq!(result.health_change, 0);
        assert_eq!(result.encounters_completed, 4);
    }

    #[test]
    fn test_scenario_retreat_before_boss() {
        let registry = FloorRegistry::builtin().unwrap();
        let floor = registry.get(1).unwrap();
        let mut state =
            init_dungeon_run(floor, 100, true, &BTreeSet::new(), &mut ScriptedRolls::low());

        state = fight(&state, floor, &mut ScriptedRolls::low());
        state = advance_to_next_encounter(&state).unwrap();
        state = fight(&state, floor, &mut ScriptedRolls::low());
        state = retreat_from_dungeon(&state).unwrap();

        assert_eq!(state.phase, RunPhase::FloorSummary);
        assert!(state.retreated);
        assert_eq!(state.total_gold, 20);

        let result = finalize_run(&state, floor, GuildRank::Novice, 1.0).unwrap();
        assert_eq!(result.outcome, RunOutcome::Retreated);
        assert_eq!(result.gold_earned, 10);
        assert_eq!(result.happiness_change, 0);
        assert!(!result.is_first_clear);
    }

    #[test]
    fn test_scenario_defeat() {
        let registry = FloorRegistry::builtin().unwrap();
        let floor = registry.get(1).unwrap();
        let mut state =
            init_dungeon_run(floor, 20, true, &BTreeSet::new(), &mut ScriptedRolls::low());

        state = fight(&state, floor, &mut ScriptedRolls::low());
        state = advance_to_next_encounter(&state).unwrap();
        state = fight(&state, floor, &mut ScriptedRolls::high());
        state = advance_to_next_encounter(&state).unwrap();
        assert_eq!(state.current_health, 3);
        assert_eq!(state.total_gold, 35);

        state = fight(&state, floor, &mut ScriptedRolls::high());
        assert_eq!(state.current_health, 0);
        state = end_run_on_death(&state).unwrap();

        assert_eq!(state.phase, RunPhase::FloorSummary);
        assert!(!state.boss_defeated);
        assert!(!state.retreated);

        let result = finalize_run(&state, floor, GuildRank::Novice, 1.0).unwrap();
        assert_eq!(result.outcome, RunOutcome::Defeated);
        assert_eq!(result.happiness_change, DEFEAT_HAPPINESS_PENALTY);
        assert_eq!(result.gold_earned, 8);
        assert_eq!(result.encounters_completed, 3);
    }

    #[test]
    fn test_out_of_time_keeps_gold() {
        let mut state = summary_with_gold(40, false, true);
        state.out_of_time = true;
        let registry = FloorRegistry::builtin().unwrap();

        let result = finalize_run(&state, registry.get(1).unwrap(), GuildRank::Novice, 1.0).unwrap();
        assert_eq!(result.outcome, RunOutcome::OutOfTime);
        assert_eq!(result.gold_earned, 40);
        assert_eq!(result.happiness_change, 0);
    }

    #[test]
    fn test_festival_multiplier() {
        let state = summary_with_gold(40, true, false);
        let registry = FloorRegistry::builtin().unwrap();
        let floor = registry.get(1).unwrap();

        assert_eq!(finalize_run(&state, floor, GuildRank::Novice, 1.5).unwrap().gold_earned, 60);
        assert_eq!(finalize_run(&state, floor, GuildRank::Novice, -3.0).unwrap().gold_earned, 0);
    }

    #[test]
    fn test_repeat_clear_no_happiness() {
        let mut state = summary_with_gold(40, true, false);
        state.is_first_clear = false;
        let registry = FloorRegistry::builtin().unwrap();

        let result = finalize_run(&state, registry.get(1).unwrap(), GuildRank::Novice, 1.0).unwrap();
        assert_eq!(result.outcome, RunOutcome::Cleared);
        assert!(!result.is_first_clear);
        assert_eq!(result.happiness_change, 0);
        assert_eq!(result.gold_earned, 40);
    }

    #[test]
    fn test_finalize_requires_summary() {
        let registry = FloorRegistry::builtin().unwrap();
        let floor = registry.get(1).unwrap();
        let state = init_dungeon_run(floor, 100, true, &BTreeSet::new(), &mut ScriptedRolls::low());

        assert_eq!(
            finalize_run(&state, floor, GuildRank::Novice, 1.0),
            Err(RunError::InvalidPhase {
                expected: RunPhase::FloorSummary,
                actual: RunPhase::EncounterIntro,
            })
        );

        let done = summary_with_gold(10, true, false);
        assert!(matches!(
            finalize_run(&done, registry.get(2).unwrap(), GuildRank::Novice, 1.0),
            Err(RunError::FloorMismatch { .. })
        ));
    }

    #[test]
    fn test_first_clear_exactly_once() {
        let registry = FloorRegistry::builtin().unwrap();
        let floor = registry.get(1).unwrap();
        let mut cleared = BTreeSet::new();
        let mut first_clears = 0;

        // Retreat, die, then clear three times
        let plans = ["retreat", "die", "clear", "clear", "clear"];
        for plan in plans {
            let health = if plan == "die" { 4 } else { 100 };
            let mut state =
                init_dungeon_run(floor, health, true, &cleared, &mut ScriptedRolls::low());
            state = match plan {
                "retreat" => {
                    let fought = fight(&state, floor, &mut ScriptedRolls::low());
                    retreat_from_dungeon(&fought).unwrap()
                }
                _ => play_to_end(state, floor),
            };

            let result = finalize_run(&state, floor, GuildRank::Novice, 1.0).unwrap();
            if result.is_first_clear {
                first_clears += 1;
                cleared.insert(result.floor_id);
            }
        }

        assert_eq!(first_clears, 1);
        assert!(cleared.contains(&1));
    }

    proptest! {
        #[test]
        fn prop_penalty_ordering(total_gold in 4i32..100_000, rank_idx in 0usize..7, floor_idx in 0usize..5) {
            let registry = FloorRegistry::builtin().unwrap();
            let floor = &registry.floors()[floor_idx];
            let rank = GuildRank::all()[rank_idx];

            let at = |boss_defeated, retreated| {
                let mut state = summary_with_gold(total_gold, boss_defeated, retreated);
                state.floor_id = floor.id;
                finalize_run(&state, floor, rank, 1.0).unwrap().gold_earned
            };

            let success = at(true, false);
            let retreat = at(false, true);
            let defeat = at(false, false);
            prop_assert!(defeat < retreat);
            prop_assert!(retreat < success);
        }
    }
}
