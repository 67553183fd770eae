//! Engine-wide balance constants
//!
//! Floor-specific knobs (encounter counts, mini-boss chance, boss damage
//! scaling, time costs) live in the floor configuration instead.

// === Run setup ===

/// Chance that a run rolls a dungeon modifier
pub const MODIFIER_CHANCE: f64 = 0.25;

/// Default chance for a floor's rare drop
pub const DEFAULT_RARE_DROP_CHANCE: f64 = 0.05;

// === Encounter resolution ===

/// Chance that a trap is disarmed when the player can disarm traps
pub const TRAP_DISARM_CHANCE: f64 = 0.75;

/// Fraction of the gold roll lost to a sprung trap
pub const TRAP_GOLD_LOSS_FRACTION: f64 = 0.5;

/// Damage output kept against ethereal monsters without the right training
pub const ETHEREAL_PENALTY: f64 = 0.3;

/// Lowest combat efficiency (attack vs. monster power) used for gold
pub const MIN_COMBAT_EFFICIENCY: f64 = 0.25;

/// Lowest fraction of incoming damage left after defense
pub const MIN_DEFENSE_FACTOR: f64 = 0.25;

/// Health restored by a healing potion (never more than the hit taken)
pub const POTION_HEAL_AMOUNT: i32 = 15;

/// Gold multiplier for defeating a mini-boss
pub const MINI_BOSS_GOLD_MULTIPLIER: f64 = 1.5;

/// Gold multiplier for defeating the floor boss
pub const BOSS_GOLD_MULTIPLIER: f64 = 3.0;

// === Stats ===

/// Hard cap on block chance
pub const MAX_BLOCK_CHANCE: f64 = 0.6;

/// Hard cap on education damage reduction
pub const MAX_DAMAGE_REDUCTION: f64 = 0.75;

/// Attack added by tempering a weapon
pub const TEMPER_WEAPON_ATTACK: u32 = 5;

/// Defense added by tempering armor
pub const TEMPER_ARMOR_DEFENSE: u32 = 5;

/// Defense added by tempering a shield
pub const TEMPER_SHIELD_DEFENSE: u32 = 3;

/// Block chance added by tempering a shield
pub const TEMPER_SHIELD_BLOCK: f64 = 0.05;

/// Durability at or below which an item counts as worn
pub const WORN_DURABILITY_THRESHOLD: u32 = 50;

/// Fraction of an item's stats kept while worn
pub const WORN_ITEM_FACTOR: f64 = 0.5;

// === Time ===

/// Combined attack + defense needed to shave one hour off a floor
pub const TIME_REDUCTION_DIVISOR: u32 = 20;

/// Margin above a floor's stat thresholds before hints stop nagging
pub const RECOMMENDED_STAT_MARGIN: u32 = 10;

// === Rewards ===

/// Extra loot per floor above the first
pub const FLOOR_LOOT_STEP: f64 = 0.1;

/// Gold kept after a voluntary retreat
pub const RETREAT_GOLD_FACTOR: f64 = 0.5;

/// Gold kept after a defeat
pub const DEFEAT_GOLD_FACTOR: f64 = 0.25;

/// Happiness change on defeat
pub const DEFEAT_HAPPINESS_PENALTY: i32 = -2;
