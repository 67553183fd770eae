//! Core types shared across the dungeon engine

use serde::{Deserialize, Serialize};

/// Identifier of a dungeon floor (1-based, 0 means "no floor")
pub type FloorId = u32;

/// Equipment slot an item occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Shield,
}

impl EquipmentSlot {
    /// Get all equipment slots
    pub fn all() -> &'static [EquipmentSlot] {
        &[EquipmentSlot::Weapon, EquipmentSlot::Armor, EquipmentSlot::Shield]
    }

    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "Weapon",
            EquipmentSlot::Armor => "Armor",
            EquipmentSlot::Shield => "Shield",
        }
    }
}

/// Kind of encounter inside a floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterKind {
    Normal,
    Trap,
    MiniBoss,
    Boss,
}

impl EncounterKind {
    /// Bosses and mini-bosses block retreat and scale damage upward
    pub fn is_boss_like(&self) -> bool {
        matches!(self, EncounterKind::MiniBoss | EncounterKind::Boss)
    }

    pub fn label(&self) -> &'static str {
        match self {
            EncounterKind::Normal => "Monster",
            EncounterKind::Trap => "Trap",
            EncounterKind::MiniBoss => "Mini-Boss",
            EncounterKind::Boss => "Boss",
        }
    }
}

/// Completed education degree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Degree {
    TradeGuild,
    JuniorAcademy,
    CombatTraining,
    MasterCombat,
    ArcaneStudies,
    Alchemy,
    Scholar,
    Loremaster,
    Commerce,
}

impl Degree {
    /// Get all degrees
    pub fn all() -> &'static [Degree] {
        &[
            Degree::TradeGuild,
            Degree::JuniorAcademy,
            Degree::CombatTraining,
            Degree::MasterCombat,
            Degree::ArcaneStudies,
            Degree::Alchemy,
            Degree::Scholar,
            Degree::Loremaster,
            Degree::Commerce,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Degree::TradeGuild => "Trade Guild Certificate",
            Degree::JuniorAcademy => "Junior Academy",
            Degree::CombatTraining => "Combat Training",
            Degree::MasterCombat => "Master Combat",
            Degree::ArcaneStudies => "Arcane Studies",
            Degree::Alchemy => "Alchemy",
            Degree::Scholar => "Scholar",
            Degree::Loremaster => "Loremaster",
            Degree::Commerce => "Commerce",
        }
    }
}

/// Adventurer's guild rank, ordered from lowest to highest
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum GuildRank {
    #[default]
    Novice,
    Apprentice,
    Journeyman,
    Adept,
    Veteran,
    Elite,
    GuildMaster,
}

impl GuildRank {
    /// Get all ranks in ascending order
    pub fn all() -> &'static [GuildRank] {
        &[
            GuildRank::Novice,
            GuildRank::Apprentice,
            GuildRank::Journeyman,
            GuildRank::Adept,
            GuildRank::Veteran,
            GuildRank::Elite,
            GuildRank::GuildMaster,
        ]
    }

    /// Zero-based position of this rank
    pub fn index(&self) -> u32 {
        *self as u32
    }

    /// Extra loot fraction granted by this rank (0.05 per rank above Novice)
    pub fn loot_bonus(&self) -> f64 {
        self.index() as f64 * 0.05
    }

    pub fn name(&self) -> &'static str {
        match self {
            GuildRank::Novice => "Novice",
            GuildRank::Apprentice => "Apprentice",
            GuildRank::Journeyman => "Journeyman",
            GuildRank::Adept => "Adept",
            GuildRank::Veteran => "Veteran",
            GuildRank::Elite => "Elite",
            GuildRank::GuildMaster => "Guild Master",
        }
    }
}
