//! Run simulation utilities

use dungeon_core::{
    advance_to_next_encounter, can_retreat, end_run_on_death, fight_current_encounter,
    finalize_run, init_dungeon_run, retreat_from_dungeon, CombatStats, DungeonFloor, DungeonRng,
    DungeonRunState, EducationBonuses, GuildRank, RunError, RunOutcome,
};
use std::collections::BTreeSet;

/// When an automated player gives up on a floor
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RetreatPolicy {
    /// Fight to the boss no matter what
    Never,
    /// Retreat once health drops below this fraction of the starting health
    BelowFraction(f64),
}

impl RetreatPolicy {
    pub fn should_retreat(&self, state: &DungeonRunState, starting_health: i32) -> bool {
        match self {
            RetreatPolicy::Never => false,
            RetreatPolicy::BelowFraction(fraction) => {
                (state.current_health as f64) < starting_health as f64 * fraction
                    && can_retreat(state)
            }
        }
    }
}

/// Aggregate results of many automated runs on one floor
#[derive(Debug, Clone, Default)]
pub struct RunSimulation {
    pub runs: u32,
    pub clears: u32,
    pub retreats: u32,
    pub defeats: u32,
    pub total_gold: u64,
    pub total_encounters: u64,
    pub rare_drops: u32,
}

impl RunSimulation {
    /// Play `runs` independent first-clear attempts on a floor
    pub fn run(
        floor: &DungeonFloor,
        stats: &CombatStats,
        education: &EducationBonuses,
        player_health: i32,
        policy: RetreatPolicy,
        runs: u32,
        rng: &mut impl DungeonRng,
    ) -> Result<Self, RunError> {
        let mut result = RunSimulation::default();
        let no_clears = BTreeSet::new();

        for _ in 0..runs {
            let mut state = init_dungeon_run(floor, player_health, true, &no_clears, rng);

            while !state.is_finished() {
                let (_, next) = fight_current_encounter(&state, floor, stats, education, rng)?;
                state = if next.current_health <= 0 {
                    end_run_on_death(&next)?
                } else if policy.should_retreat(&next, player_health) {
                    retreat_from_dungeon(&next)?
                } else {
                    advance_to_next_encounter(&next)?
                };
            }

            let finished = finalize_run(&state, floor, GuildRank::Novice, 1.0)?;
            result.runs += 1;
            result.total_gold += finished.gold_earned as u64;
            result.total_encounters += finished.encounters_completed as u64;
            if finished.rare_drop_name.is_some() {
                result.rare_drops += 1;
            }
            match finished.outcome {
                RunOutcome::Cleared => result.clears += 1,
                RunOutcome::Retreated | RunOutcome::OutOfTime => result.retreats += 1,
                RunOutcome::Defeated => result.defeats += 1,
            }
        }

        Ok(result)
    }

    /// Percentage of runs that beat the boss
    pub fn clear_rate(&self) -> f64 {
        self.rate(self.clears)
    }

    pub fn defeat_rate(&self) -> f64 {
        self.rate(self.defeats)
    }

    /// Average gold per run
    pub fn avg_gold(&self) -> f64 {
        if self.runs > 0 {
            self.total_gold as f64 / self.runs as f64
        } else {
            0.0
        }
    }

    fn rate(&self, count: u32) -> f64 {
        if self.runs > 0 {
            count as f64 / self.runs as f64 * 100.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungeon_core::{FloorRegistry, RngSource, ScriptedRolls};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_run_simulation() {
        let registry = FloorRegistry::builtin().unwrap();
        let floor = registry.get(1).unwrap();
        let stats = CombatStats {
            attack: 12,
            defense: 8,
            block_chance: 0.1,
        };
        let mut rng = RngSource::new(ChaCha8Rng::seed_from_u64(42));

        let result = RunSimulation::run(
            floor,
            &stats,
            &EducationBonuses::default(),
            100,
            RetreatPolicy::BelowFraction(0.3),
            50,
            &mut rng,
        )
        .unwrap();

        assert_eq!(result.runs, 50);
        assert_eq!(result.clears + result.retreats + result.defeats, 50);
        assert!(result.clear_rate() > 0.0);
        assert!(result.avg_gold() > 0.0);
    }

    #[test]
    fn test_weak_player_never_retreating_dies() {
        let registry = FloorRegistry::builtin().unwrap();
        let floor = registry.get(5).unwrap();

        let result = RunSimulation::run(
            floor,
            &CombatStats::default(),
            &EducationBonuses::default(),
            20,
            RetreatPolicy::Never,
            3,
            &mut ScriptedRolls::high(),
        )
        .unwrap();

        assert_eq!(result.defeats, 3);
        assert!((result.defeat_rate() - 100.0).abs() < f64::EPSILON);
        assert_eq!(result.retreats, 0);
    }

    #[test]
    fn test_retreat_policy() {
        let registry = FloorRegistry::builtin().unwrap();
        let floor = registry.get(1).unwrap();
        let mut state = init_dungeon_run(
            floor,
            100,
            true,
            &BTreeSet::new(),
            &mut ScriptedRolls::low(),
        );

        assert!(!RetreatPolicy::Never.should_retreat(&state, 100));
        state.current_health = 20;
        assert!(RetreatPolicy::BelowFraction(0.5).should_retreat(&state, 100));
        assert!(!RetreatPolicy::BelowFraction(0.1).should_retreat(&state, 100));
    }

    #[test]
    fn test_empty_simulation() {
        let sim = RunSimulation::default();
        assert!((sim.avg_gold() - 0.0).abs() < f64::EPSILON);
        assert!((sim.clear_rate() - 0.0).abs() < f64::EPSILON);
    }
}
