//! Trade flow provider (EXIM-style import/export figures).

use async_trait::async_trait;
use innomed_common::SourceKind;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::instrument;

use crate::fixtures::{FixtureStore, EXIM};
use crate::DataSource;

pub struct TradeSource {
    fixtures: Arc<FixtureStore>,
}

impl TradeSource {
    pub fn new(fixtures: Arc<FixtureStore>) -> Self {
        Self { fixtures }
    }
}

#[async_trait]
impl DataSource for TradeSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Trade
    }

    /// Unknown molecules yield an empty record rather than an error.
    #[instrument(skip(self))]
    async fn fetch(&self, molecule: &str) -> anyhow::Result<Value> {
        Ok(self
            .fixtures
            .lookup(&EXIM, molecule)
            .await?
            .unwrap_or_else(|| Value::Object(Map::new())))
    }
}
