//! Mock data tables backing the fixture-driven providers.
//!
//! Each table is a JSON object keyed by normalised molecule name. A table is
//! read from `<data_dir>/<file_name>` when a data directory is configured and
//! the file exists, otherwise from the copy compiled into this crate.

use anyhow::Context;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A named mock table with its compiled-in fallback.
#[derive(Debug, Clone, Copy)]
pub struct FixtureTable {
    pub file_name: &'static str,
    embedded: &'static str,
}

pub const IQVIA: FixtureTable = FixtureTable {
    file_name: "mock_iqvia.json",
    embedded: include_str!("../data/mock_iqvia.json"),
};

pub const EXIM: FixtureTable = FixtureTable {
    file_name: "mock_exim.json",
    embedded: include_str!("../data/mock_exim.json"),
};

pub const PATENTS: FixtureTable = FixtureTable {
    file_name: "mock_patents.json",
    embedded: include_str!("../data/mock_patents.json"),
};

pub const TRIALS: FixtureTable = FixtureTable {
    file_name: "mock_trials.json",
    embedded: include_str!("../data/mock_trials.json"),
};

#[derive(Debug, Clone, Default)]
pub struct FixtureStore {
    data_dir: Option<PathBuf>,
}

impl FixtureStore {
    /// Use only the compiled-in tables.
    pub fn embedded() -> Self {
        Self { data_dir: None }
    }

    /// Prefer tables found in `dir`, falling back to the compiled-in copies.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self { data_dir: Some(dir.as_ref().to_path_buf()) }
    }

    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    /// Load a whole table. A file that exists but does not parse is an error.
    pub async fn load(&self, table: &FixtureTable) -> anyhow::Result<Value> {
        if let Some(ref dir) = self.data_dir {
            let path = dir.join(table.file_name);
            if tokio::fs::try_exists(&path).await.unwrap_or(false) {
                let raw = tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("reading {}", path.display()))?;
                let value = serde_json::from_str(&raw)
                    .with_context(|| format!("parsing {}", path.display()))?;
                debug!(path = %path.display(), "Loaded fixture table from data dir");
                return Ok(value);
            }
            debug!(path = %path.display(), "Fixture file not found, using embedded table");
        }
        serde_json::from_str(table.embedded)
            .with_context(|| format!("parsing embedded {}", table.file_name))
    }

    /// Look up one molecule's entry in a table.
    pub async fn lookup(&self, table: &FixtureTable, molecule: &str) -> anyhow::Result<Option<Value>> {
        let data = self.load(table).await?;
        Ok(data.get(molecule).cloned())
    }
}
