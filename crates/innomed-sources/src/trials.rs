//! Clinical trial registry provider.

use async_trait::async_trait;
use innomed_common::SourceKind;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::fixtures::{FixtureStore, TRIALS};
use crate::DataSource;

pub struct TrialSource {
    fixtures: Arc<FixtureStore>,
}

impl TrialSource {
    pub fn new(fixtures: Arc<FixtureStore>) -> Self {
        Self { fixtures }
    }
}

#[async_trait]
impl DataSource for TrialSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Trials
    }

    #[instrument(skip(self))]
    async fn fetch(&self, molecule: &str) -> anyhow::Result<Value> {
        let trials = self
            .fixtures
            .lookup(&TRIALS, molecule)
            .await?
            .unwrap_or_else(|| Value::Array(Vec::new()));
        info!(
            molecule,
            n = trials.as_array().map(|a| a.len()).unwrap_or(0),
            "Clinical trials retrieved"
        );
        Ok(trials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trial_lookup() {
        let source = TrialSource::new(Arc::new(FixtureStore::embedded()));
        let trials = source.fetch("Metformin").await.unwrap();
        assert_eq!(trials.as_array().map(|a| a.len()), Some(6));
        // One registry entry carries no phase
        assert!(trials.as_array().unwrap().iter().any(|t| t["phase"].is_null()));
    }
}
