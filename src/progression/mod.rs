//! Progression module
//!
//! Leveling thresholds and end-of-run ratings.

pub mod xp;

pub use xp::{rating_for_score, xp_for_level, XP_PER_LEVEL};
