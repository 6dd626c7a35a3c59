//! The full provider line-up consulted for each query.

use innomed_common::SourceKind;
use std::sync::Arc;

use crate::fixtures::FixtureStore;
use crate::internal::InternalInsightsSource;
use crate::market::MarketSource;
use crate::patents::PatentSource;
use crate::trade::TradeSource;
use crate::trials::TrialSource;
use crate::web::WebLiteratureSource;
use crate::DataSource;

/// One provider per domain. Slots are filled at construction so a set is
/// always complete.
#[derive(Clone)]
pub struct SourceSet {
    market: Arc<dyn DataSource>,
    trade: Arc<dyn DataSource>,
    patents: Arc<dyn DataSource>,
    trials: Arc<dyn DataSource>,
    web: Arc<dyn DataSource>,
    internal: Arc<dyn DataSource>,
}

impl SourceSet {
    /// Standard mock providers reading from the given fixtures.
    pub fn mock(fixtures: FixtureStore) -> Self {
        let fixtures = Arc::new(fixtures);
        Self {
            market:   Arc::new(MarketSource::new(fixtures.clone())),
            trade:    Arc::new(TradeSource::new(fixtures.clone())),
            patents:  Arc::new(PatentSource::new(fixtures.clone())),
            trials:   Arc::new(TrialSource::new(fixtures)),
            web:      Arc::new(WebLiteratureSource::new()),
            internal: Arc::new(InternalInsightsSource::new()),
        }
    }

    /// Standard mock providers over the compiled-in fixtures.
    pub fn embedded() -> Self {
        Self::mock(FixtureStore::embedded())
    }

    /// Swap the provider in the slot matching `source.kind()`.
    pub fn replace(mut self, source: Arc<dyn DataSource>) -> Self {
        let slot = match source.kind() {
            SourceKind::Market   => &mut self.market,
            SourceKind::Trade    => &mut self.trade,
            SourceKind::Patents  => &mut self.patents,
            SourceKind::Trials   => &mut self.trials,
            SourceKind::Web      => &mut self.web,
            SourceKind::Internal => &mut self.internal,
        };
        *slot = source;
        self
    }

    pub fn get(&self, kind: SourceKind) -> Arc<dyn DataSource> {
        match kind {
            SourceKind::Market   => self.market.clone(),
            SourceKind::Trade    => self.trade.clone(),
            SourceKind::Patents  => self.patents.clone(),
            SourceKind::Trials   => self.trials.clone(),
            SourceKind::Web      => self.web.clone(),
            SourceKind::Internal => self.internal.clone(),
        }
    }
}

impl Default for SourceSet {
    fn default() -> Self {
        Self::embedded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::StaticSource;
    use serde_json::json;

    #[test]
    fn test_slots_match_their_kind() {
        let set = SourceSet::embedded();
        for kind in SourceKind::ALL {
            assert_eq!(set.get(kind).kind(), kind);
        }
    }

    #[tokio::test]
    async fn test_replace_targets_matching_slot() {
        let set = SourceSet::embedded()
            .replace(Arc::new(StaticSource::ok(SourceKind::Internal, json!({"documents_analyzed": 0}))));
        let notes = set.get(SourceKind::Internal).fetch("Aspirin").await.unwrap();
        assert_eq!(notes["documents_analyzed"], 0);
        // Other slots untouched
        let web = set.get(SourceKind::Web).fetch("Aspirin").await.unwrap();
        assert!(web["top_papers"].is_array());
    }
}
