//! Floor entry requirements and selection-screen hints

use super::DungeonFloor;
use crate::constants::RECOMMENDED_STAT_MARGIN;
use crate::stats::CombatStats;
use crate::types::{Degree, FloorId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Whether a player may enter a floor, with every unmet condition listed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorEligibility {
    pub can_enter: bool,
    pub reasons: Vec<String>,
}

/// Check every entry requirement of a floor
///
/// Reasons accumulate so the caller can show all blockers at once.
pub fn check_floor_requirements(
    floor: &DungeonFloor,
    floors_cleared: &BTreeSet<FloorId>,
    weapon: Option<&str>,
    armor: Option<&str>,
    stats: &CombatStats,
) -> FloorEligibility {
    let req = &floor.requirements;
    let mut reasons = Vec::new();

    if !floor.prerequisite_met(floors_cleared) {
        reasons.push(format!("Clear Floor {} first", req.previous_floor));
    }
    if req.requires_weapon && weapon.is_none() {
        reasons.push("Requires a weapon equipped".to_string());
    }
    if req.requires_armor && armor.is_none() {
        reasons.push("Requires armor equipped".to_string());
    }
    if stats.attack < req.min_attack {
        reasons.push(format!(
            "Requires {} attack (you have {})",
            req.min_attack, stats.attack
        ));
    }
    if stats.defense < req.min_defense {
        reasons.push(format!(
            "Requires {} defense (you have {})",
            req.min_defense, stats.defense
        ));
    }

    FloorEligibility {
        can_enter: reasons.is_empty(),
        reasons,
    }
}

/// Advice for the floor list: missing degrees and thin stats
pub fn recommended_gear_hints(
    floor: &DungeonFloor,
    stats: &CombatStats,
    degrees: &BTreeSet<Degree>,
) -> Vec<String> {
    let req = &floor.requirements;
    let mut hints = Vec::new();

    for degree in &req.recommended_degrees {
        if !degrees.contains(degree) {
            hints.push(format!("Recommended degree: {}", degree.name()));
        }
    }

    let comfortable_attack = req.min_attack + RECOMMENDED_STAT_MARGIN;
    if req.min_attack > 0 && stats.attack < comfortable_attack {
        hints.push(format!("Recommended attack: {comfortable_attack}+"));
    }
    let comfortable_defense = req.min_defense + RECOMMENDED_STAT_MARGIN;
    if req.min_defense > 0 && stats.defense < comfortable_defense {
        hints.push(format!("Recommended defense: {comfortable_defense}+"));
    }

    if floor.encounters.iter().any(|e| e.ethereal)
        || floor.mini_boss.as_ref().is_some_and(|m| m.ethereal)
    {
        hints.push("Ethereal foes: arcane training needed to hurt them".to_string());
    }

    hints
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floor::FloorRegistry;

    fn stats(attack: u32, defense: u32) -> CombatStats {
        CombatStats {
            attack,
            defense,
            block_chance: 0.0,
        }
    }

    #[test]
    fn test_first_floor_open_to_everyone() {
        let registry = FloorRegistry::builtin().unwrap();
        let floor = registry.get(1).unwrap();

        let result = check_floor_requirements(floor, &BTreeSet::new(), None, None, &stats(0, 0));
        assert!(result.can_enter);
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn test_reasons_accumulate() {
        let registry = FloorRegistry::builtin().unwrap();
        let floor = registry.get(3).unwrap();

        let result = check_floor_requirements(floor, &BTreeSet::new(), None, None, &stats(0, 0));
        assert!(!result.can_enter);
        // prerequisite, weapon, armor, attack, defense
        assert_eq!(result.reasons.len(), 5);
        assert!(result.reasons[0].contains("Floor 2"));
    }

    #[test]
    fn test_meets_all_requirements() {
        let registry = FloorRegistry::builtin().unwrap();
        let floor = registry.get(2).unwrap();
        let cleared = BTreeSet::from([1]);

        let result = check_floor_requirements(
            floor,
            &cleared,
            Some("iron_sword"),
            None,
            &stats(floor.requirements.min_attack, 0),
        );
        assert!(result.can_enter, "{:?}", result.reasons);
    }

    #[test]
    fn test_only_stat_shortfall() {
        let registry = FloorRegistry::builtin().unwrap();
        let floor = registry.get(2).unwrap();
        let cleared = BTreeSet::from([1]);

        let result =
            check_floor_requirements(floor, &cleared, Some("dagger"), None, &stats(1, 0));
        assert!(!result.can_enter);
        assert_eq!(result.reasons.len(), 1);
        assert!(result.reasons[0].contains("attack"));
    }

    #[test]
    fn test_hints_list_missing_degrees() {
        let registry = FloorRegistry::builtin().unwrap();
        let floor = registry.get(3).unwrap();

        let hints = recommended_gear_hints(floor, &stats(100, 100), &BTreeSet::new());
        assert!(hints.iter().any(|h| h.contains("Arcane Studies")));
        assert!(hints.iter().any(|h| h.contains("Ethereal")));

        let degrees: BTreeSet<Degree> = floor.requirements.recommended_degrees.iter().copied().collect();
        let hints = recommended_gear_hints(floor, &stats(100, 100), &degrees);
        assert!(!hints.iter().any(|h| h.starts_with("Recommended degree")));
    }

    #[test]
    fn test_hints_flag_thin_stats() {
        let registry = FloorRegistry::builtin().unwrap();
        let floor = registry.get(4).unwrap();
        let req = &floor.requirements;

        let hints = recommended_gear_hints(
            floor,
            &stats(req.min_attack, req.min_defense),
            &BTreeSet::new(),
        );
        assert!(hints.iter().any(|h| h.starts_with("Recommended attack")));
        assert!(hints.iter().any(|h| h.starts_with("Recommended defense")));
    }
}
