//! Integration test: Enter floor -> Fight every encounter -> Finalize -> Unlock next floor
//!
//! Drives the engine the way the TUI does, but without a terminal.

use dungeon_core::{
    advance_to_next_encounter, calculate_combat_stats, calculate_education_bonuses,
    check_floor_requirements, end_run_on_death, fight_current_encounter, finalize_run,
    get_dungeon_progress, init_dungeon_run, DungeonFloor, DungeonRecords, DungeonRng,
    DungeonRunState, EquipmentCatalog, FloorId, FloorRegistry, GuildRank, RngSource, RunOutcome,
    RunPhase, ScriptedRolls,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::{BTreeSet, HashMap};

/// Helper to print a separator
fn separator(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("  {}", title);
    println!("{}\n", "=".repeat(60));
}

struct Player {
    health: i32,
    gold: u32,
    happiness: i32,
    floors_cleared: BTreeSet<FloorId>,
}

/// Play a run to its end, applying each encounter's health change as it lands
fn play_floor(
    floor: &DungeonFloor,
    player: &mut Player,
    catalog: &EquipmentCatalog,
    rng: &mut impl DungeonRng,
) -> DungeonRunState {
    let stats = calculate_combat_stats(
        catalog,
        Some("iron_sword"),
        Some("leather_armor"),
        Some("wooden_shield"),
        &BTreeSet::new(),
        None,
    );
    let education = calculate_education_bonuses(&BTreeSet::new());
    let mut state = init_dungeon_run(floor, player.health, true, &player.floors_cleared, rng);

    while !state.is_finished() {
        let (result, next) =
            fight_current_encounter(&state, floor, &stats, &education, rng).unwrap();
        println!("  {:<18} {}", result.encounter_name, result.summary());
        player.health = (player.health + result.health_delta()).max(0);
        assert_eq!(player.health, next.current_health);

        state = if next.current_health <= 0 {
            end_run_on_death(&next).unwrap()
        } else {
            advance_to_next_encounter(&next).unwrap()
        };
    }

    let result = finalize_run(&state, floor, GuildRank::Novice, 1.0).unwrap();
    println!("  => {} ({} gold)", result.outcome.label(), result.gold_earned);
    player.gold += result.gold_earned;
    player.happiness += result.happiness_change;
    if result.is_first_clear {
        player.floors_cleared.insert(floor.id);
    }
    state
}

#[test]
fn test_clear_first_floor_unlocks_second() {
    separator("Floor 1 with starter gear");

    let registry = FloorRegistry::builtin().unwrap();
    let catalog = EquipmentCatalog::builtin().unwrap();
    let mut player = Player {
        health: 100,
        gold: 0,
        happiness: 50,
        floors_cleared: BTreeSet::new(),
    };

    let floor_2 = registry.get(2).unwrap();
    let stats = calculate_combat_stats(
        &catalog,
        Some("iron_sword"),
        None,
        None,
        &BTreeSet::new(),
        None,
    );
    let before = check_floor_requirements(
        floor_2,
        &player.floors_cleared,
        Some("iron_sword"),
        None,
        &stats,
    );
    assert!(!before.can_enter);

    let floor_1 = registry.get(1).unwrap();
    let state = play_floor(floor_1, &mut player, &catalog, &mut ScriptedRolls::low());

    assert_eq!(state.phase, RunPhase::FloorSummary);
    assert!(state.boss_defeated);
    assert!(player.floors_cleared.contains(&1));
    assert!(player.gold > 0);
    assert_eq!(player.happiness, 50 + floor_1.happiness_on_clear);

    let after = check_floor_requirements(
        floor_2,
        &player.floors_cleared,
        Some("iron_sword"),
        None,
        &stats,
    );
    assert!(after.can_enter, "{:?}", after.reasons);

    let progress = get_dungeon_progress(&player.floors_cleared, &registry);
    assert_eq!(progress.total_floors_cleared, 1);
    assert!(!progress.all_floors_cleared);
}

#[test]
fn test_repeat_clear_grants_no_happiness() {
    separator("Floor 1 twice");

    let registry = FloorRegistry::builtin().unwrap();
    let catalog = EquipmentCatalog::builtin().unwrap();
    let floor = registry.get(1).unwrap();
    let mut player = Player {
        health: 100,
        gold: 0,
        happiness: 0,
        floors_cleared: BTreeSet::new(),
    };

    play_floor(floor, &mut player, &catalog, &mut ScriptedRolls::low());
    let after_first = player.happiness;
    player.health = 100;
    let second = play_floor(floor, &mut player, &catalog, &mut ScriptedRolls::low());

    assert!(second.boss_defeated);
    assert!(!second.is_first_clear);
    assert_eq!(player.happiness, after_first);
}

#[test]
fn test_seeded_runs_replay_identically() {
    separator("Seeded replay");

    let registry = FloorRegistry::builtin().unwrap();
    let catalog = EquipmentCatalog::builtin().unwrap();
    let floor = registry.get(1).unwrap();

    let play = |seed: u64| {
        let mut player = Player {
            health: 100,
            gold: 0,
            happiness: 0,
            floors_cleared: BTreeSet::new(),
        };
        let mut rng = RngSource::new(ChaCha8Rng::seed_from_u64(seed));
        let state = play_floor(floor, &mut player, &catalog, &mut rng);
        (state, player.gold)
    };

    let (a, gold_a) = play(1234);
    let (b, gold_b) = play(1234);
    assert_eq!(a, b);
    assert_eq!(gold_a, gold_b);
}

#[test]
fn test_many_seeds_keep_health_consistent() {
    separator("Health bookkeeping across seeds");

    let registry = FloorRegistry::builtin().unwrap();
    let catalog = EquipmentCatalog::builtin().unwrap();
    let mut outcomes: HashMap<RunOutcome, u32> = HashMap::new();

    for floor in registry.floors() {
        for seed in 0..20 {
            let mut player = Player {
                health: 60,
                gold: 0,
                happiness: 0,
                floors_cleared: (1..floor.id).collect(),
            };
            let mut rng = RngSource::new(ChaCha8Rng::seed_from_u64(seed));
            let state = play_floor(floor, &mut player, &catalog, &mut rng);

            let delta: i32 = state.results.iter().map(|r| r.health_delta()).sum();
            if state.current_health > 0 {
                assert_eq!(state.current_health, 60 + delta);
            } else {
                assert!(60 + delta <= 0);
            }
            assert!(state.encounters_completed() <= state.encounters.len());

            let outcome = RunOutcome::from_state(&state);
            *outcomes.entry(outcome).or_default() += 1;
        }
    }

    println!("  outcomes: {:?}", outcomes);
    assert_eq!(outcomes.values().sum::<u32>(), registry.len() as u32 * 20);
}
