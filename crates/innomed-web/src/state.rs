//! Shared application state for the web server.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use innomed_mit::Orchestrator;

use crate::cache::ResponseCache;
use crate::validate::QueryLimits;

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    /// Boundary-only cache for `/query` responses
    pub cache: ResponseCache,
    pub limits: QueryLimits,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(orchestrator: Arc<Orchestrator>, cache: ResponseCache, limits: QueryLimits) -> Self {
        Self { orchestrator, cache, limits, started_at: Utc::now() }
    }
}

pub type SharedState = Arc<AppState>;
