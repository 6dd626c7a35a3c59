//! Assembles a [`Profile`] from the six provider payloads.

use chrono::{DateTime, Utc};
use innomed_common::{normalize_molecule, InnomedError, Result, AGENTS_USED};
use innomed_sources::SourcePayloads;
use tracing::debug;

use crate::highlights::derive_highlights;
use crate::profile::{Profile, ProfileMetadata};
use crate::records::{record_map, MarketRecord, PatentRecord, TrialRecord, WebRecord};
use crate::scorer::compute_innovation_score;
use crate::weights::ScoreWeights;

#[derive(Debug, Clone, Default)]
pub struct ProfileBuilder {
    weights: ScoreWeights,
}

impl ProfileBuilder {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Build a profile stamped with the current UTC time.
    pub fn build(&self, molecule: &str, payloads: &SourcePayloads) -> Result<Profile> {
        self.build_at(molecule, payloads, Utc::now())
    }

    /// Build with an explicit creation time.
    ///
    /// Any payload shape is accepted; only a blank molecule fails.
    pub fn build_at(
        &self,
        molecule: &str,
        payloads: &SourcePayloads,
        created_at: DateTime<Utc>,
    ) -> Result<Profile> {
        let molecule = normalize_molecule(molecule);
        if molecule.is_empty() {
            return Err(InnomedError::Build("molecule identifier is empty".into()));
        }

        let market = MarketRecord::from_value(&payloads.market);
        let patents = PatentRecord::list_from_value(&payloads.patents);
        let trials = TrialRecord::list_from_value(&payloads.trials);
        let web = WebRecord::from_value(&payloads.web);

        let highlights = derive_highlights(market.as_ref(), &patents, &trials, web.as_ref());

        let mut profile = Profile {
            molecule,
            market,
            trade: record_map(&payloads.trade),
            patents,
            trials,
            web,
            internal: record_map(&payloads.internal),
            highlights,
            innovation_score: 0,
            metadata: ProfileMetadata { created_at, agents_used: AGENTS_USED },
        };
        profile.innovation_score = compute_innovation_score(&profile, &self.weights);

        debug!(
            molecule = %profile.molecule,
            score = profile.innovation_score,
            highlights = profile.highlights.len(),
            "profile built"
        );
        Ok(profile)
    }
}
