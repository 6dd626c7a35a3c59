//! The Molecule Innovation Twin (MIT) profile.
//!
//! A profile is only ever produced by [`crate::builder::ProfileBuilder`].
//! Fields are read-only from outside this crate, so the score and
//! highlights can never drift from the data they were derived from.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::records::{MarketRecord, PatentRecord, RecordMap, TrialRecord, WebRecord};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileMetadata {
    pub created_at: DateTime<Utc>,
    pub agents_used: u32,
}

/// Serialise-only: reading one back would bypass the builder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub(crate) molecule: String,
    pub(crate) market: Option<MarketRecord>,
    pub(crate) trade: Option<RecordMap>,
    pub(crate) patents: Vec<PatentRecord>,
    pub(crate) trials: Vec<TrialRecord>,
    pub(crate) web: Option<WebRecord>,
    pub(crate) internal: Option<RecordMap>,
    pub(crate) highlights: Vec<String>,
    pub(crate) innovation_score: u32,
    pub(crate) metadata: ProfileMetadata,
}

impl Profile {
    pub fn molecule(&self) -> &str {
        &self.molecule
    }

    pub fn market(&self) -> Option<&MarketRecord> {
        self.market.as_ref()
    }

    pub fn trade(&self) -> Option<&RecordMap> {
        self.trade.as_ref()
    }

    pub fn patents(&self) -> &[PatentRecord] {
        &self.patents
    }

    pub fn trials(&self) -> &[TrialRecord] {
        &self.trials
    }

    pub fn web(&self) -> Option<&WebRecord> {
        self.web.as_ref()
    }

    pub fn internal(&self) -> Option<&RecordMap> {
        self.internal.as_ref()
    }

    /// Display-ordered summary lines.
    pub fn highlights(&self) -> &[String] {
        &self.highlights
    }

    /// Composite score in `[0, 100]`.
    pub fn innovation_score(&self) -> u32 {
        self.innovation_score
    }

    pub fn metadata(&self) -> &ProfileMetadata {
        &self.metadata
    }

    /// Market size if the market record carries a numeric one.
    pub fn market_size(&self) -> Option<f64> {
        self.market.as_ref().and_then(|m| m.market_size)
    }

    pub fn expired_patent_count(&self) -> usize {
        self.patents.iter().filter(|p| p.is_expired()).count()
    }

    /// Papers listed under `web.top_papers`; zero when web is absent.
    pub fn paper_count(&self) -> usize {
        self.web.as_ref().map(|w| w.top_papers.len()).unwrap_or(0)
    }
}
