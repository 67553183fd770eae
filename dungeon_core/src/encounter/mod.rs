//! Encounters - the steps of a floor and their resolution

mod resolution;
mod result;

pub use resolution::{combat_efficiency, resolve_encounter};
pub use result::{EncounterEvent, EncounterResult};

use crate::floor::{DungeonFloor, EncounterTemplate, MonsterTemplate};
use crate::types::EncounterKind;
use serde::{Deserialize, Serialize};

/// One resolvable step inside a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    pub kind: EncounterKind,
    pub name: String,
    /// Strength the player's attack is measured against
    pub power: u32,
    pub ethereal: bool,
    /// Whether the floor's rare drop can be rolled here
    pub rare_drop_eligible: bool,
}

impl Encounter {
    /// Regular encounter drawn from a floor's pool
    pub fn from_template(template: &EncounterTemplate) -> Self {
        Encounter {
            kind: template.kind,
            name: template.name.clone(),
            power: template.power,
            ethereal: template.ethereal,
            rare_drop_eligible: false,
        }
    }

    pub fn mini_boss(template: &MonsterTemplate) -> Self {
        Encounter {
            kind: EncounterKind::MiniBoss,
            name: template.name.clone(),
            power: template.power,
            ethereal: template.ethereal,
            rare_drop_eligible: false,
        }
    }

    /// The floor boss; only first-clear runs may roll the rare drop
    pub fn boss(floor: &DungeonFloor, rare_drop_eligible: bool) -> Self {
        Encounter {
            kind: EncounterKind::Boss,
            name: floor.boss.name.clone(),
            power: floor.boss.base_power,
            ethereal: false,
            rare_drop_eligible,
        }
    }
}
