//! Combat module
//!
//! Turn-based fights between the player and a single monster.

pub mod encounter;

pub use encounter::{monster_health_fill, CombatAction, Encounter, RoundOutcome, RoundReport, FLEE_CHANCE};
