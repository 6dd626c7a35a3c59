//! Patent landscape provider.

use async_trait::async_trait;
use innomed_common::SourceKind;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::fixtures::{FixtureStore, PATENTS};
use crate::DataSource;

pub struct PatentSource {
    fixtures: Arc<FixtureStore>,
}

impl PatentSource {
    pub fn new(fixtures: Arc<FixtureStore>) -> Self {
        Self { fixtures }
    }
}

#[async_trait]
impl DataSource for PatentSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Patents
    }

    #[instrument(skip(self))]
    async fn fetch(&self, molecule: &str) -> anyhow::Result<Value> {
        let patents = self
            .fixtures
            .lookup(&PATENTS, molecule)
            .await?
            .unwrap_or_else(|| Value::Array(Vec::new()));
        info!(
            molecule,
            n = patents.as_array().map(|a| a.len()).unwrap_or(0),
            "Patents retrieved"
        );
        Ok(patents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_patent_lookup() {
        let source = PatentSource::new(Arc::new(FixtureStore::embedded()));
        let aspirin = source.fetch("Aspirin").await.unwrap();
        let expired = aspirin
            .as_array()
            .unwrap()
            .iter()
            .filter(|p| p["status"] == "expired")
            .count();
        assert_eq!(expired, 4);

        let none = source.fetch("Unobtainium").await.unwrap();
        assert_eq!(none, Value::Array(vec![]));
    }
}
