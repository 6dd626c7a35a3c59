//! innomed-sources — Intelligence providers for molecule profiles.
//!
//! Six independent domains (market, trade, patents, trials, web, internal)
//! each sit behind the [`DataSource`] trait. Providers are called through
//! [`safe::safe_fetch`], which turns any provider failure into a neutral
//! default plus a warning so one broken source never aborts a query.

pub mod fixtures;
pub mod market;
pub mod trade;
pub mod patents;
pub mod trials;
pub mod web;
pub mod internal;
pub mod mock;
pub mod payloads;
pub mod safe;
pub mod set;

use async_trait::async_trait;
use innomed_common::SourceKind;

pub use payloads::SourcePayloads;
pub use safe::{fetch_all, safe_fetch, FetchReport, SourceOutcome, SourceTimeouts};
pub use set::SourceSet;

/// Common interface for all intelligence providers.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Which profile slot this provider fills.
    fn kind(&self) -> SourceKind;

    /// Fetch the loosely-typed record (or list of records) for a molecule.
    ///
    /// Implementations return their domain's neutral value for unknown
    /// molecules; `Err` is reserved for genuine failures.
    async fn fetch(&self, molecule: &str) -> anyhow::Result<serde_json::Value>;
}
