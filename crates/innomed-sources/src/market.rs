//! Market intelligence provider (IQVIA-style market sizing).

use async_trait::async_trait;
use innomed_common::SourceKind;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::fixtures::{FixtureStore, IQVIA};
use crate::DataSource;

/// Record returned when neither the molecule nor a `"default"` entry exists.
pub fn default_market_record() -> Value {
    json!({
        "market_size": 500_000_000u64,
        "cagr": 5.5,
        "regions": [
            {"name": "North America", "size": 250_000_000u64, "growth": 4.2},
            {"name": "Europe",        "size": 150_000_000u64, "growth": 3.8},
            {"name": "Asia Pacific",  "size": 100_000_000u64, "growth": 8.5}
        ],
        "key_players": ["Company A", "Company B", "Company C"],
        "competitive_landscape": "Moderate competition with several established players and emerging entrants",
        "forecast": "Steady growth expected due to aging population and increased R&D"
    })
}

pub struct MarketSource {
    fixtures: Arc<FixtureStore>,
}

impl MarketSource {
    pub fn new(fixtures: Arc<FixtureStore>) -> Self {
        Self { fixtures }
    }
}

#[async_trait]
impl DataSource for MarketSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Market
    }

    #[instrument(skip(self))]
    async fn fetch(&self, molecule: &str) -> anyhow::Result<Value> {
        let table = self.fixtures.load(&IQVIA).await?;
        let record = match table.get(molecule) {
            Some(record) => record.clone(),
            None => {
                debug!(molecule, "No market entry, using default market record");
                table.get("default").cloned().unwrap_or_else(default_market_record)
            }
        };
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> MarketSource {
        MarketSource::new(Arc::new(FixtureStore::embedded()))
    }

    #[tokio::test]
    async fn test_known_molecule() {
        let record = source().fetch("Semaglutide").await.unwrap();
        assert_eq!(record["market_size"].as_f64(), Some(21_000_000_000.0));
        assert!(record["key_players"].is_array());
    }

    #[tokio::test]
    async fn test_unknown_molecule_gets_default_entry() {
        let record = source().fetch("Unobtainium").await.unwrap();
        assert_eq!(record["market_size"].as_f64(), Some(500_000_000.0));
        assert_eq!(record["cagr"].as_f64(), Some(5.5));
    }

    #[tokio::test]
    async fn test_table_without_default_uses_builtin_record() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("mock_iqvia.json"), "{}").unwrap();
        let source = MarketSource::new(Arc::new(FixtureStore::from_dir(dir.path())));
        let record = source.fetch("Aspirin").await.unwrap();
        assert_eq!(record, default_market_record());
    }
}
