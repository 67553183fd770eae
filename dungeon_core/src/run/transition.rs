//! Run transitions
//!
//! EncounterIntro --fight--> EncounterResult --advance--> EncounterIntro
//!                                          \--advance (last)--> FloorSummary
//! Retreat, death and time exhaustion jump straight to FloorSummary.

use super::{DungeonRunState, RunError, RunPhase};
use crate::encounter::{resolve_encounter, Encounter, EncounterResult};
use crate::floor::DungeonFloor;
use crate::modifier::{builtin_modifiers, roll_modifier};
use crate::rng::DungeonRng;
use crate::stats::{CombatStats, EducationBonuses};
use crate::types::{EncounterKind, FloorId};
use std::collections::BTreeSet;

/// Start a run on a floor
///
/// `is_first_clear` is the caller's flag; the run only counts as a first
/// clear if the floor is also missing from `floors_cleared`. The value is
/// fixed for the rest of the run.
pub fn init_dungeon_run(
    floor: &DungeonFloor,
    player_health: i32,
    is_first_clear: bool,
    floors_cleared: &BTreeSet<FloorId>,
    rng: &mut impl DungeonRng,
) -> DungeonRunState {
    let is_first_clear = is_first_clear && !floors_cleared.contains(&floor.id);
    let encounters = build_encounter_sequence(floor, is_first_clear, rng);
    let has_mini_boss = encounters.iter().any(|e| e.kind == EncounterKind::MiniBoss);
    let modifier = roll_modifier(&builtin_modifiers(), rng);

    log::debug!(
        "Run started on floor {} ({} encounters, mini-boss: {}, modifier: {})",
        floor.id,
        encounters.len(),
        has_mini_boss,
        modifier.as_ref().map_or("none", |m| m.name.as_str())
    );

    DungeonRunState {
        floor_id: floor.id,
        phase: RunPhase::EncounterIntro,
        encounters,
        current_encounter_index: 0,
        current_health: player_health,
        total_gold: 0,
        total_damage: 0,
        total_healed: 0,
        results: Vec::new(),
        modifier,
        has_mini_boss,
        boss_defeated: false,
        retreated: false,
        out_of_time: false,
        is_first_clear,
        rare_drop_name: None,
    }
}

/// Roll the encounter list for a run
///
/// `normal_encounters` picks from the floor pool, the mini-boss (if the floor
/// has one and the chance hits) goes in the middle, the boss always last.
pub fn build_encounter_sequence(
    floor: &DungeonFloor,
    rare_drop_eligible: bool,
    rng: &mut impl DungeonRng,
) -> Vec<Encounter> {
    let mut encounters = Vec::with_capacity(floor.planned_encounters() + 1);

    if !floor.encounters.is_empty() {
        for _ in 0..floor.normal_encounters {
            let pick = rng.roll_index(floor.encounters.len());
            if let Some(template) = floor.encounters.get(pick) {
                encounters.push(Encounter::from_template(template));
            }
        }
    }

    if let Some(mini_boss) = &floor.mini_boss {
        if rng.roll_chance(floor.mini_boss_chance) {
            let position = encounters.len().div_ceil(2);
            encounters.insert(position, Encounter::mini_boss(mini_boss));
        }
    }

    encounters.push(Encounter::boss(floor, rare_drop_eligible));
    encounters
}

/// Fold an encounter result into the run
pub fn apply_encounter_result(
    state: &DungeonRunState,
    result: &EncounterResult,
) -> Result<DungeonRunState, RunError> {
    expect_phase(state, RunPhase::EncounterIntro)?;
    let encounter = current_encounter(state)?;

    let mut next = state.clone();
    next.current_health = (state.current_health + result.health_delta()).max(0);
    next.total_damage += result.damage_taken;
    next.total_healed += result.healed;
    next.total_gold = (state.total_gold + result.gold_gained).max(0);

    if let Some(drop) = &result.rare_drop {
        next.rare_drop_name = Some(drop.clone());
    }
    if encounter.kind == EncounterKind::Boss && next.current_health > 0 {
        next.boss_defeated = true;
    }

    next.results.push(result.clone());
    next.phase = RunPhase::EncounterResult;

    log::debug!(
        "Floor {} encounter {} ({}): {}",
        state.floor_id,
        state.current_encounter_index + 1,
        encounter.name,
        result.summary()
    );

    Ok(next)
}

/// Resolve the current encounter and apply it in one step
pub fn fight_current_encounter(
    state: &DungeonRunState,
    floor: &DungeonFloor,
    stats: &CombatStats,
    education: &EducationBonuses,
    rng: &mut impl DungeonRng,
) -> Result<(EncounterResult, DungeonRunState), RunError> {
    if floor.id != state.floor_id {
        return Err(RunError::FloorMismatch {
            expected: state.floor_id,
            actual: floor.id,
        });
    }
    expect_phase(state, RunPhase::EncounterIntro)?;
    if state.current_health <= 0 {
        return Err(RunError::PlayerDown);
    }
    let encounter = current_encounter(state)?;

    let result = resolve_encounter(
        floor,
        encounter,
        stats,
        education,
        state.current_health,
        state.modifier.as_ref(),
        rng,
    );
    let next = apply_encounter_result(state, &result)?;
    Ok((result, next))
}

/// Move past the last resolved encounter
///
/// This is the step that costs in-game time; callers charge it first.
pub fn advance_to_next_encounter(state: &DungeonRunState) -> Result<DungeonRunState, RunError> {
    expect_phase(state, RunPhase::EncounterResult)?;
    if state.current_health <= 0 {
        return Err(RunError::PlayerDown);
    }

    let mut next = state.clone();
    next.current_encounter_index += 1;
    next.phase = if next.current_encounter_index >= next.encounters.len() {
        RunPhase::FloorSummary
    } else {
        RunPhase::EncounterIntro
    };

    log::debug!(
        "Floor {} advanced to {} ({}/{})",
        state.floor_id,
        next.phase,
        next.current_encounter_index,
        next.encounters.len()
    );

    Ok(next)
}

/// Check whether retreat is allowed right now
pub fn check_retreat(state: &DungeonRunState) -> Result<(), RunError> {
    if state.is_finished() {
        return Err(RunError::RunFinished);
    }
    if state.current_health <= 0 {
        return Err(RunError::PlayerDown);
    }
    match state.upcoming_encounter() {
        None => Err(RunError::NoEncounterAhead),
        Some(next) if next.kind.is_boss_like() => Err(RunError::RetreatBlocked {
            next: format!("{} {}", next.kind.label(), next.name),
        }),
        Some(_) => Ok(()),
    }
}

/// Whether the retreat action should be offered
pub fn can_retreat(state: &DungeonRunState) -> bool {
    check_retreat(state).is_ok()
}

/// Leave the floor voluntarily
pub fn retreat_from_dungeon(state: &DungeonRunState) -> Result<DungeonRunState, RunError> {
    if let Err(err) = check_retreat(state) {
        if err.is_policy() {
            log::warn!("Retreat refused on floor {}: {}", state.floor_id, err);
        }
        return Err(err);
    }

    let mut next = state.clone();
    next.retreated = true;
    next.phase = RunPhase::FloorSummary;
    log::debug!(
        "Retreated from floor {} with {} gold",
        state.floor_id,
        state.total_gold
    );
    Ok(next)
}

/// Stop the run because the player's health reached zero
///
/// Called by the owner of the authoritative health once it reports death.
pub fn end_run_on_death(state: &DungeonRunState) -> Result<DungeonRunState, RunError> {
    if state.is_finished() {
        return Err(RunError::RunFinished);
    }

    let mut next = state.clone();
    next.current_health = 0;
    next.boss_defeated = false;
    next.retreated = false;
    next.phase = RunPhase::FloorSummary;
    log::debug!(
        "Player fell on floor {} after {} encounters",
        state.floor_id,
        state.encounters_completed()
    );
    Ok(next)
}

/// Stop the run because the player has no time left to continue
///
/// Counts as a retreat but keeps all gold found.
pub fn end_run_out_of_time(state: &DungeonRunState) -> Result<DungeonRunState, RunError> {
    if state.is_finished() {
        return Err(RunError::RunFinished);
    }

    let mut next = state.clone();
    next.retreated = true;
    next.out_of_time = true;
    next.phase = RunPhase::FloorSummary;
    log::debug!("Out of time on floor {}", state.floor_id);
    Ok(next)
}

fn expect_phase(state: &DungeonRunState, expected: RunPhase) -> Result<(), RunError> {
    if state.phase == expected {
        Ok(())
    } else {
        Err(RunError::InvalidPhase {
            expected,
            actual: state.phase,
        })
    }
}

fn current_encounter(state: &DungeonRunState) -> Result<&Encounter, RunError> {
    state
        .current_encounter()
        .ok_or(RunError::EncounterOutOfRange {
            index: state.current_encounter_index,
            len: state.encounters.len(),
        })
}
