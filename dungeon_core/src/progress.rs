//! Progress queries and per-floor records

use crate::floor::FloorRegistry;
use crate::reward::RunResult;
use crate::types::FloorId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// How far a player has made it through the dungeon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonProgress {
    pub total_floors_cleared: usize,
    pub total_floors: usize,
    pub all_floors_cleared: bool,
}

/// Aggregate the cleared set against the registry
///
/// Ids that are not in the registry are ignored.
pub fn get_dungeon_progress(
    floors_cleared: &BTreeSet<FloorId>,
    registry: &FloorRegistry,
) -> DungeonProgress {
    let total_floors = registry.len();
    let total_floors_cleared = registry
        .floors()
        .iter()
        .filter(|f| floors_cleared.contains(&f.id))
        .count();

    DungeonProgress {
        total_floors_cleared,
        total_floors,
        all_floors_cleared: total_floors > 0 && total_floors_cleared == total_floors,
    }
}

/// Best results on one floor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorRecord {
    pub best_gold: u32,
    pub best_encounters: usize,
    pub runs: u32,
}

/// Leaderboard entries keyed by floor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DungeonRecords {
    floors: BTreeMap<FloorId, FloorRecord>,
}

impl DungeonRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a finished run into its floor's record
    pub fn record_run(&mut self, result: &RunResult) -> FloorRecord {
        let record = self.floors.entry(result.floor_id).or_default();
        record.best_gold = record.best_gold.max(result.gold_earned);
        record.best_encounters = record.best_encounters.max(result.encounters_completed);
        record.runs += 1;
        *record
    }

    pub fn get(&self, floor_id: FloorId) -> Option<&FloorRecord> {
        self.floors.get(&floor_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FloorId, &FloorRecord)> {
        self.floors.iter()
    }

    pub fn total_runs(&self) -> u32 {
        self.floors.values().map(|r| r.runs).sum()
    }
}
