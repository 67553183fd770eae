//! Player store and the run protocol around dungeon_core

use dungeon_core::{
    advance_to_next_encounter, calculate_combat_stats, calculate_education_bonuses, can_retreat,
    check_floor_requirements, end_run_on_death, end_run_out_of_time, fight_current_encounter,
    finalize_run, get_dungeon_progress, get_encounter_time_cost, init_dungeon_run,
    recommended_gear_hints, retreat_from_dungeon, CombatStats, Degree, DungeonFloor,
    DungeonProgress, DungeonRecords, DungeonRng, DungeonRunState, EducationBonuses,
    EncounterResult, EquipmentCatalog, EquipmentSlot, FloorEligibility, FloorId, FloorRegistry, GuildRank,
    RunError, RunPhase, RunResult,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

/// Errors surfaced to the front end
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Unknown floor {0}")]
    UnknownFloor(FloorId),

    #[error("Cannot enter {name}: {}", reasons.join("; "))]
    NotEligible { name: String, reasons: Vec<String> },

    #[error("Not enough time: need {needed}h, {available}h left this week")]
    NotEnoughTime { needed: u32, available: u32 },

    #[error("Too wounded to enter the dungeon")]
    PlayerDown,

    #[error("A run is already in progress")]
    RunInProgress,

    #[error("No run in progress")]
    NoActiveRun,

    #[error("No {} in the catalog", .0.name())]
    NoGear(EquipmentSlot),

    #[error(transparent)]
    Run(#[from] RunError),
}

/// The authoritative player record
///
/// Runs only ever see snapshots of this; every change goes through the
/// session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: String,
    pub gold: u32,
    pub health: i32,
    pub max_health: i32,
    pub happiness: i32,
    /// Hours left this week
    pub hours_left: u32,

    // === Equipment ===
    pub weapon: Option<String>,
    pub armor: Option<String>,
    pub shield: Option<String>,
    pub tempered: BTreeSet<String>,
    /// Durability per item id; items missing here are pristine
    pub durability: Option<HashMap<String, u32>>,

    // === Progression ===
    pub degrees: BTreeSet<Degree>,
    pub floors_cleared: BTreeSet<FloorId>,
    pub rare_items: Vec<String>,
    pub guild_rank: GuildRank,
    /// 1.0 outside festivals
    pub festival_gold_multiplier: f64,
}

impl PlayerState {
    /// A fresh adventurer with starter gear
    pub fn starter(name: &str) -> Self {
        PlayerState {
            name: name.to_string(),
            gold: 50,
            health: 100,
            max_health: 100,
            happiness: 50,
            hours_left: 60,
            weapon: Some("iron_sword".to_string()),
            armor: Some("leather_armor".to_string()),
            shield: Some("wooden_shield".to_string()),
            tempered: BTreeSet::new(),
            durability: None,
            degrees: BTreeSet::from([Degree::TradeGuild]),
            floors_cleared: BTreeSet::new(),
            rare_items: Vec::new(),
            guild_rank: GuildRank::Novice,
            festival_gold_multiplier: 1.0,
        }
    }

    pub fn combat_stats(&self, catalog: &EquipmentCatalog) -> CombatStats {
        calculate_combat_stats(
            catalog,
            self.weapon.as_deref(),
            self.armor.as_deref(),
            self.shield.as_deref(),
            &self.tempered,
            self.durability.as_ref(),
        )
    }

    pub fn education(&self) -> EducationBonuses {
        calculate_education_bonuses(&self.degrees)
    }

    /// Apply a health change, clamped to `0..=max_health`
    ///
    /// Returns true when the player is dead afterwards.
    pub fn apply_health_delta(&mut self, delta: i32) -> bool {
        self.health = (self.health + delta).clamp(0, self.max_health);
        self.health == 0
    }

    /// Spend hours if there are enough left
    pub fn spend_hours(&mut self, hours: u32) -> bool {
        if self.hours_left < hours {
            return false;
        }
        self.hours_left -= hours;
        true
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Start a new week: time refills and wounds heal
    pub fn rest(&mut self, hours: u32) {
        self.hours_left = hours;
        self.health = self.max_health;
    }
}

/// A run in progress plus the snapshots it was started with
#[derive(Debug, Clone)]
struct ActiveRun {
    state: DungeonRunState,
    stats: CombatStats,
    education: EducationBonuses,
    hours_per_encounter: u32,
}

/// What happened when the player chose to press on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinueOutcome {
    /// Moved on to the next encounter
    Advanced,
    /// The boss is down; the run has been finalized
    FloorComplete,
    /// Not enough hours for the next encounter; the run has been finalized
    OutOfTime,
}

/// Drives dungeon runs for one player
pub struct DungeonSession {
    registry: FloorRegistry,
    catalog: EquipmentCatalog,
    pub player: PlayerState,
    pub records: DungeonRecords,
    run: Option<ActiveRun>,
    /// Final state and rewards of the last finished run
    pub last_run: Option<(DungeonRunState, RunResult)>,
    /// Narration for the front end, newest last
    pub log: Vec<String>,
}

impl DungeonSession {
    const MAX_LOG: usize = 200;

    pub fn new(registry: FloorRegistry, catalog: EquipmentCatalog, player: PlayerState) -> Self {
        DungeonSession {
            registry,
            catalog,
            player,
            records: DungeonRecords::new(),
            run: None,
            last_run: None,
            log: Vec::new(),
        }
    }

    pub fn registry(&self) -> &FloorRegistry {
        &self.registry
    }

    pub fn run_state(&self) -> Option<&DungeonRunState> {
        self.run.as_ref().map(|r| &r.state)
    }

    pub fn in_run(&self) -> bool {
        self.run.is_some()
    }

    pub fn combat_stats(&self) -> CombatStats {
        self.player.combat_stats(&self.catalog)
    }

    pub fn progress(&self) -> DungeonProgress {
        get_dungeon_progress(&self.player.floors_cleared, &self.registry)
    }

    /// Entry check for the floor list
    pub fn floor_eligibility(&self, floor: &DungeonFloor) -> FloorEligibility {
        check_floor_requirements(
            floor,
            &self.player.floors_cleared,
            self.player.weapon.as_deref(),
            self.player.armor.as_deref(),
            &self.combat_stats(),
        )
    }

    pub fn floor_hints(&self, floor: &DungeonFloor) -> Vec<String> {
        recommended_gear_hints(floor, &self.combat_stats(), &self.player.degrees)
    }

    /// Hours charged per encounter on a floor with the current gear
    pub fn hours_per_encounter(&self, floor: &DungeonFloor) -> u32 {
        get_encounter_time_cost(floor, &self.combat_stats(), floor.planned_encounters())
    }

    /// Swap the item in a slot for the next one in the catalog, weakest first
    ///
    /// Wraps around after the strongest item. Returns the new item's name.
    pub fn cycle_gear(&mut self, slot: EquipmentSlot) -> Result<String, SessionError> {
        if self.run.is_some() {
            return Err(SessionError::RunInProgress);
        }
        let items = self.catalog.items_for_slot(slot);
        let equipped = match slot {
            EquipmentSlot::Weapon => &mut self.player.weapon,
            EquipmentSlot::Armor => &mut self.player.armor,
            EquipmentSlot::Shield => &mut self.player.shield,
        };
        let next = equipped
            .as_deref()
            .and_then(|id| items.iter().position(|item| item.id == id))
            .map_or(0, |i| (i + 1) % items.len().max(1));
        let item = items.get(next).ok_or(SessionError::NoGear(slot))?;

        *equipped = Some(item.id.clone());
        let name = item.name.clone();
        self.push_log(format!("Equipped {} as {}", name, slot.name()));
        Ok(name)
    }

    /// Whether the retreat action should be offered right now
    pub fn can_retreat(&self) -> bool {
        self.run.as_ref().is_some_and(|r| can_retreat(&r.state))
    }

    /// Enter a floor: check eligibility, charge the first encounter, start the run
    pub fn enter_floor(
        &mut self,
        floor_id: FloorId,
        rng: &mut impl DungeonRng,
    ) -> Result<&DungeonRunState, SessionError> {
        if self.run.is_some() {
            return Err(SessionError::RunInProgress);
        }
        if !self.player.is_alive() {
            return Err(SessionError::PlayerDown);
        }
        let floor = self
            .registry
            .get(floor_id)
            .ok_or(SessionError::UnknownFloor(floor_id))?;

        let eligibility = self.floor_eligibility(floor);
        if !eligibility.can_enter {
            return Err(SessionError::NotEligible {
                name: floor.name.clone(),
                reasons: eligibility.reasons,
            });
        }

        let stats = self.combat_stats();
        let education = self.player.education();
        let needed = self.hours_per_encounter(floor);
        if self.player.hours_left < needed {
            return Err(SessionError::NotEnoughTime {
                needed,
                available: self.player.hours_left,
            });
        }

        let state = init_dungeon_run(
            floor,
            self.player.health,
            true,
            &self.player.floors_cleared,
            rng,
        );
        let hours_per_encounter = get_encounter_time_cost(floor, &stats, state.encounters.len());
        self.player.spend_hours(hours_per_encounter);

        let mut intro = format!(
            "Entered {} ({} encounters, {}h each)",
            floor.name,
            state.encounters.len(),
            hours_per_encounter
        );
        if let Some(modifier) = &state.modifier {
            intro.push_str(&format!(" - {} {}", modifier.icon, modifier.name));
        }
        self.push_log(intro);

        let run = self.run.insert(ActiveRun {
            state,
            stats,
            education,
            hours_per_encounter,
        });
        Ok(&run.state)
    }

    /// Fight the current encounter
    ///
    /// The health change is applied to the player straight away. If that
    /// kills the player, the run ends and is finalized as a defeat.
    pub fn fight(&mut self, rng: &mut impl DungeonRng) -> Result<EncounterResult, SessionError> {
        let run = self.run.as_ref().ok_or(SessionError::NoActiveRun)?;
        let floor = self
            .registry
            .get(run.state.floor_id)
            .ok_or(SessionError::UnknownFloor(run.state.floor_id))?;

        let (result, next) =
            fight_current_encounter(&run.state, floor, &run.stats, &run.education, rng)?;
        let dead = self.player.apply_health_delta(result.health_delta());

        self.push_log(format!(
            "{} {}: {}",
            result.kind.label(),
            result.encounter_name,
            result.summary()
        ));

        if dead {
            let ended = end_run_on_death(&next)?;
            self.push_log("You collapse and are dragged out of the dungeon.".to_string());
            self.finish(ended)?;
        } else if let Some(run) = self.run.as_mut() {
            run.state = next;
        }

        Ok(result)
    }

    /// Move on after an encounter
    ///
    /// Charges the next encounter's hours first; if the week has run out the
    /// run ends with all gold kept.
    pub fn continue_run(&mut self) -> Result<ContinueOutcome, SessionError> {
        let run = self.run.as_ref().ok_or(SessionError::NoActiveRun)?;
        let has_next = run.state.upcoming_encounter().is_some()
            && run.state.phase == RunPhase::EncounterResult;
        let hours = run.hours_per_encounter;

        if has_next && !self.player.spend_hours(hours) {
            let ended = end_run_out_of_time(&run.state)?;
            self.push_log("Out of time for this week. You head home.".to_string());
            self.finish(ended)?;
            return Ok(ContinueOutcome::OutOfTime);
        }

        let next = advance_to_next_encounter(&run.state)?;
        if next.is_finished() {
            self.finish(next)?;
            return Ok(ContinueOutcome::FloorComplete);
        }

        if let Some(run) = self.run.as_mut() {
            run.state = next;
        }
        Ok(ContinueOutcome::Advanced)
    }

    /// Leave the floor before the next encounter
    pub fn retreat(&mut self) -> Result<(), SessionError> {
        let run = self.run.as_ref().ok_or(SessionError::NoActiveRun)?;
        let ended = retreat_from_dungeon(&run.state)?;
        self.push_log("You retreat to the surface.".to_string());
        self.finish(ended)
    }

    /// Finalize a run and apply its rewards to the player
    fn finish(&mut self, state: DungeonRunState) -> Result<(), SessionError> {
        let floor = self
            .registry
            .get(state.floor_id)
            .ok_or(SessionError::UnknownFloor(state.floor_id))?;
        let result = finalize_run(
            &state,
            floor,
            self.player.guild_rank,
            self.player.festival_gold_multiplier,
        )?;

        self.player.gold = self.player.gold.saturating_add(result.gold_earned);
        self.player.happiness += result.happiness_change;
        self.player.apply_health_delta(result.health_change);
        if result.is_first_clear {
            self.player.floors_cleared.insert(result.floor_id);
        }
        if let Some(drop) = &result.rare_drop_name {
            self.player.rare_items.push(drop.clone());
        }
        let record = self.records.record_run(&result);

        self.push_log(format!(
            "{}: {} gold, happiness {:+} (best {} gold over {} runs)",
            result.outcome.label(),
            result.gold_earned,
            result.happiness_change,
            record.best_gold,
            record.runs
        ));

        self.run = None;
        self.last_run = Some((state, result));
        Ok(())
    }

    /// Records and player as JSON, for the log on exit
    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&(&self.player, &self.records))
    }

    fn push_log(&mut self, line: String) {
        log::debug!("{}", line);
        self.log.push(line);
        if self.log.len() > Self::MAX_LOG {
            let excess = self.log.len() - Self::MAX_LOG;
            self.log.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungeon_core::{RunOutcome, ScriptedRolls};

    fn session() -> DungeonSession {
        DungeonSession::new(
            FloorRegistry::builtin().unwrap(),
            EquipmentCatalog::builtin().unwrap(),
            PlayerState::starter("Tester"),
        )
    }

    #[test]
    fn test_starter_stats() {
        let session = session();
        let stats = session.combat_stats();
        assert_eq!(stats.attack, 12);
        assert_eq!(stats.defense, 8);
        assert!((stats.block_chance - 0.10).abs() < f64::EPSILON);
    }

    #[test]
    fn test_floor_two_locked() {
        let mut session = session();
        let err = session.enter_floor(2, &mut ScriptedRolls::low()).unwrap_err();
        assert!(matches!(err, SessionError::NotEligible { .. }));
        assert!(err.to_string().contains("Clear Floor 1 first"));
        assert!(!session.in_run());
    }

    #[test]
    fn test_enter_charges_time() {
        let mut session = session();
        let hours = session.player.hours_left;
        session.enter_floor(1, &mut ScriptedRolls::low()).unwrap();
        assert!(session.in_run());
        assert_eq!(session.player.hours_left, hours - 2);
        assert!(matches!(
            session.enter_floor(1, &mut ScriptedRolls::low()),
            Err(SessionError::RunInProgress)
        ));
    }

    #[test]
    fn test_full_clear_persists_first_clear() {
        let mut session = session();
        let mut rng = ScriptedRolls::low();
        session.enter_floor(1, &mut rng).unwrap();

        let mut applied = 0;
        loop {
            let result = session.fight(&mut rng).unwrap();
            applied += result.health_delta();
            match session.continue_run().unwrap() {
                ContinueOutcome::Advanced => continue,
                ContinueOutcome::FloorComplete => break,
                ContinueOutcome::OutOfTime => panic!("ran out of time"),
            }
        }

        let (state, result) = session.last_run.clone().unwrap();
        assert_eq!(state.phase, RunPhase::FloorSummary);
        assert_eq!(result.outcome, RunOutcome::Cleared);
        assert!(result.is_first_clear);
        assert!(session.player.floors_cleared.contains(&1));
        assert_eq!(session.player.health, 100 + applied);
        assert_eq!(applied, state.net_health_change());
        assert_eq!(session.player.happiness, 55);
        assert_eq!(session.records.get(1).unwrap().runs, 1);

        // Floor 2 now opens up
        let floor = session.registry().get(2).unwrap().clone();
        assert!(session.floor_eligibility(&floor).can_enter);
    }

    #[test]
    fn test_death_interrupts_run() {
        let mut session = session();
        session.player.health = 3;
        let mut rng = ScriptedRolls::high();
        session.enter_floor(1, &mut rng).unwrap();

        session.fight(&mut rng).unwrap();
        assert!(!session.in_run());
        assert_eq!(session.player.health, 0);

        let (_, result) = session.last_run.as_ref().unwrap();
        assert_eq!(result.outcome, RunOutcome::Defeated);
        assert_eq!(session.player.happiness, 48);
        assert!(matches!(
            session.enter_floor(1, &mut rng),
            Err(SessionError::PlayerDown)
        ));
    }

    #[test]
    fn test_out_of_time_keeps_gold() {
        let mut session = session();
        let mut rng = ScriptedRolls::low();
        session.player.hours_left = 2;
        session.enter_floor(1, &mut rng).unwrap();
        session.fight(&mut rng).unwrap();

        let gold_before = session.player.gold;
        let found = session.run_state().unwrap().total_gold as u32;
        assert_eq!(session.continue_run().unwrap(), ContinueOutcome::OutOfTime);

        let (_, result) = session.last_run.as_ref().unwrap();
        assert_eq!(result.outcome, RunOutcome::OutOfTime);
        assert_eq!(session.player.gold, gold_before + found);
    }

    #[test]
    fn test_retreat_blocked_is_reported() {
        let mut session = session();
        let mut rng = ScriptedRolls::low();
        session.enter_floor(1, &mut rng).unwrap();

        for _ in 0..3 {
            session.fight(&mut rng).unwrap();
            if !session.can_retreat() {
                break;
            }
            session.continue_run().unwrap();
        }

        assert!(session.in_run());
        assert!(matches!(
            session.retreat(),
            Err(SessionError::Run(RunError::RetreatBlocked { .. }))
        ));
    }

    #[test]
    fn test_cycle_gear_walks_catalog() {
        let mut session = session();
        let before = session.combat_stats().attack;

        let name = session.cycle_gear(EquipmentSlot::Weapon).unwrap();
        assert_eq!(name, "Steel Sword");
        assert_eq!(session.player.weapon.as_deref(), Some("steel_sword"));
        assert!(session.combat_stats().attack > before);

        let weapons = session.catalog.items_for_slot(EquipmentSlot::Weapon).len();
        for _ in 0..weapons - 2 {
            session.cycle_gear(EquipmentSlot::Weapon).unwrap();
        }
        assert_eq!(session.player.weapon.as_deref(), Some("dagger"));

        session.player.shield = None;
        session.cycle_gear(EquipmentSlot::Shield).unwrap();
        assert_eq!(session.player.shield.as_deref(), Some("wooden_shield"));
    }

    #[test]
    fn test_cycle_gear_refused_mid_run() {
        let mut session = session();
        session.enter_floor(1, &mut ScriptedRolls::low()).unwrap();
        assert!(matches!(
            session.cycle_gear(EquipmentSlot::Armor),
            Err(SessionError::RunInProgress)
        ));
        assert_eq!(session.player.armor.as_deref(), Some("leather_armor"));
    }

    #[test]
    fn test_snapshot_json() {
        let session = session();
        let json = session.snapshot_json().unwrap();
        assert!(json.contains("\"Tester\""));
    }
}
