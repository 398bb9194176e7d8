//! Scoring policy: point awards, streak penalties, and their configuration.

use serde::{Deserialize, Serialize};

/// Point and penalty constants for a quiz session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Points for any correct answer, before the streak bonus.
    pub base_points: u32,
    /// Extra points per unit of post-answer streak.
    pub streak_bonus: u32,
    /// Penalty for any incorrect answer, before the streak component.
    pub penalty_base: u32,
    /// Extra penalty per unit of the streak being broken.
    pub penalty_per_streak: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_points: 100,
            streak_bonus: 10,
            penalty_base: 30,
            penalty_per_streak: 5,
        }
    }
}

/// Points earned for a correct answer that raises the streak to
/// `streak_after` (the pre-answer streak plus one).
pub fn points_earned(config: &ScoringConfig, streak_after: u32) -> u32 {
    config.base_points + streak_after * config.streak_bonus
}

/// Penalty for an incorrect answer at pre-answer streak `streak_before`.
pub fn penalty_on_miss(config: &ScoringConfig, streak_before: u32) -> u32 {
    config.penalty_base + streak_before * config.penalty_per_streak
}

/// Apply a penalty to a running score, flooring at zero.
pub fn apply_penalty(points: u32, penalty: u32) -> u32 {
    points.saturating_sub(penalty)
}
