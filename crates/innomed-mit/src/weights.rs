//! Weights for the innovation score.
//!
//! Each evidence term contributes a fixed number of points per item up to
//! its own cap; the market term always contributes exactly one tier.

use serde::{Deserialize, Serialize};

/// Hard ceiling applied to the summed score.
pub const SCORE_CEILING: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Market size strictly above this earns the large tier
    pub market_large_threshold: f64,
    /// Market size strictly above this (and not large) earns the mid tier
    pub market_mid_threshold: f64,
    pub market_large_points: u32,
    pub market_mid_points: u32,
    /// Applies when market size is missing, zero, or below both thresholds
    pub market_base_points: u32,

    pub points_per_trial: u32,
    pub trial_cap: u32,

    pub points_per_expired_patent: u32,
    pub expired_patent_cap: u32,

    pub points_per_paper: u32,
    pub paper_cap: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            market_large_threshold: 1_000_000_000.0,
            market_mid_threshold:   100_000_000.0,
            market_large_points:    30,
            market_mid_points:      20,
            market_base_points:     10,

            points_per_trial: 5,
            trial_cap:        25,

            points_per_expired_patent: 5,
            expired_patent_cap:        20,

            points_per_paper: 5,
            paper_cap:        15,
        }
    }
}

impl ScoreWeights {
    /// Thresholds and tiers must be ordered large > mid > base.
    pub fn validate(&self) -> bool {
        self.market_large_threshold > self.market_mid_threshold
            && self.market_large_points >= self.market_mid_points
            && self.market_mid_points >= self.market_base_points
    }

    /// Highest score these weights can produce after the ceiling.
    pub fn max_attainable(&self) -> u32 {
        let market = self
            .market_large_points
            .max(self.market_mid_points)
            .max(self.market_base_points);
        (market + self.trial_cap + self.expired_patent_cap + self.paper_cap).min(SCORE_CEILING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_are_ordered() {
        assert!(ScoreWeights::default().validate());
    }

    #[test]
    fn test_default_ceiling_is_ninety() {
        // 30 + 25 + 20 + 15: the outer clamp at 100 is never reached
        assert_eq!(ScoreWeights::default().max_attainable(), 90);
    }

    #[test]
    fn test_inverted_tiers_fail_validation() {
        let w = ScoreWeights { market_mid_points: 40, ..Default::default() };
        assert!(!w.validate());
    }

    #[test]
    fn test_max_attainable_respects_ceiling() {
        let w = ScoreWeights { trial_cap: 80, ..Default::default() };
        assert_eq!(w.max_attainable(), SCORE_CEILING);
    }
}
