//! Innovation score computation.
//!
//! S = min(M + min(5·T, 25) + min(5·E, 20) + min(5·P, 15), 100)
//!
//! M is the market tier (30 / 20 / 10), T the trial count, E the number of
//! patents with status exactly `"expired"`, P the number of top papers.
//! Pure and deterministic: the score depends only on the profile's source
//! fields, never on its highlights, timestamp or previous score.

use serde::{Deserialize, Serialize};

use crate::profile::Profile;
use crate::weights::{ScoreWeights, SCORE_CEILING};

/// Points contributed by each term, before the outer ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub market: u32,
    pub trials: u32,
    pub expired_patents: u32,
    pub literature: u32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u32 {
        (self.market + self.trials + self.expired_patents + self.literature).min(SCORE_CEILING)
    }
}

/// Market tier. Exactly one tier always applies, so this is never zero.
pub fn market_points(market_size: Option<f64>, weights: &ScoreWeights) -> u32 {
    match market_size {
        Some(ms) if ms > weights.market_large_threshold => weights.market_large_points,
        Some(ms) if ms > weights.market_mid_threshold => weights.market_mid_points,
        _ => weights.market_base_points,
    }
}

fn capped(count: usize, per_item: u32, cap: u32) -> u32 {
    let count = u32::try_from(count).unwrap_or(u32::MAX);
    count.saturating_mul(per_item).min(cap)
}

pub fn score_breakdown(profile: &Profile, weights: &ScoreWeights) -> ScoreBreakdown {
    ScoreBreakdown {
        market: market_points(profile.market_size(), weights),
        trials: capped(profile.trials().len(), weights.points_per_trial, weights.trial_cap),
        expired_patents: capped(
            profile.expired_patent_count(),
            weights.points_per_expired_patent,
            weights.expired_patent_cap,
        ),
        literature: capped(profile.paper_count(), weights.points_per_paper, weights.paper_cap),
    }
}

pub fn compute_innovation_score(profile: &Profile, weights: &ScoreWeights) -> u32 {
    score_breakdown(profile, weights).total()
}
