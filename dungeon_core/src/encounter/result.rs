//! EncounterResult - Outcome of resolving one encounter

use super::Encounter;
use crate::types::EncounterKind;
use serde::{Deserialize, Serialize};

/// Notable things that happened during an encounter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EncounterEvent {
    /// The shield caught the hit
    Blocked { amount: i32 },
    /// A trap was disarmed: no damage, no gold lost
    TrapDisarmed,
    /// A trap went off and cost gold
    TrapSprung { gold_lost: i32 },
    /// A healing potion closed the wound
    PotionHealed { amount: i32 },
    /// The monster was ethereal and shrugged off most of the player's attacks
    EtherealResisted,
}

/// Immutable record of one resolved encounter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterResult {
    // === Identity ===
    pub encounter_name: String,
    pub kind: EncounterKind,

    // === Damage ===
    /// Damage dealt to the player after all mitigation
    pub damage_taken: i32,
    /// Damage prevented by a block or a disarmed trap
    pub damage_avoided: i32,
    /// Health restored by a potion
    pub healed: i32,

    // === Loot ===
    /// Gold gained; negative when a trap took some
    pub gold_gained: i32,
    /// Name of the rare drop, if it triggered
    pub rare_drop: Option<String>,

    // === Events ===
    pub events: Vec<EncounterEvent>,

    // === State Changes ===
    pub health_before: i32,
    pub health_after: i32,
    pub is_killing_blow: bool,
}

impl EncounterResult {
    /// Empty result for an encounter
    pub fn new(encounter: &Encounter) -> Self {
        EncounterResult {
            encounter_name: encounter.name.clone(),
            kind: encounter.kind,
            damage_taken: 0,
            damage_avoided: 0,
            healed: 0,
            gold_gained: 0,
            rare_drop: None,
            events: Vec::new(),
            health_before: 0,
            health_after: 0,
            is_killing_blow: false,
        }
    }

    /// Net change to apply to the authoritative player health
    pub fn health_delta(&self) -> i32 {
        self.healed - self.damage_taken
    }

    pub fn was_blocked(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, EncounterEvent::Blocked { .. }))
    }

    pub fn trap_disarmed(&self) -> bool {
        self.events.contains(&EncounterEvent::TrapDisarmed)
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        if self.damage_taken > 0 {
            parts.push(format!("{} damage taken", self.damage_taken));
        }

        for event in &self.events {
            match event {
                EncounterEvent::Blocked { amount } => parts.push(format!("{amount} blocked")),
                EncounterEvent::TrapDisarmed => parts.push("trap disarmed".to_string()),
                EncounterEvent::TrapSprung { gold_lost } => {
                    parts.push(format!("trap sprung, {gold_lost} gold lost"))
                }
                EncounterEvent::PotionHealed { amount } => {
                    parts.push(format!("potion healed {amount}"))
                }
                EncounterEvent::EtherealResisted => parts.push("ethereal foe resisted".to_string()),
            }
        }

        if self.gold_gained > 0 {
            parts.push(format!("{} gold found", self.gold_gained));
        }

        if let Some(drop) = &self.rare_drop {
            parts.push(format!("found {drop}!"));
        }

        if self.is_killing_blow {
            parts.push("FATAL".to_string());
        }

        if parts.is_empty() {
            "No damage".to_string()
        } else {
            parts.join(", ")
        }
    }
}
