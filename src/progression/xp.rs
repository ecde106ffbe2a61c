//! Experience and ratings
//!
//! Level thresholds and the end-of-run rating derived from score.

/// Experience needed per level
pub const XP_PER_LEVEL: u32 = 100;

/// Experience needed to advance past `level`
pub fn xp_for_level(level: u32) -> u32 {
    level.saturating_mul(XP_PER_LEVEL)
}

/// Get a rating title for a final score
pub fn rating_for_score(score: u32) -> &'static str {
    match score {
        500.. => "Legendary Hero",
        300..=499 => "Great Seeker",
        150..=299 => "Seasoned Warrior",
        50..=149 => "Budding Hero",
        _ => "Novice",
    }
}
