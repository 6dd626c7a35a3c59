//! Service status and liveness.

use axum::extract::State;
use chrono::Utc;
use serde::Serialize;

use crate::envelope::{ApiError, ApiResponse};
use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub service: &'static str,
    pub version: &'static str,
    pub status: &'static str,
    pub started_at: chrono::DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub uptime_seconds: i64,
    pub profiles: usize,
    pub history_entries: usize,
    pub cached_items: usize,
    pub cache_enabled: bool,
}

/// GET /
pub async fn service_status(State(state): State<SharedState>) -> Result<ApiResponse, ApiError> {
    let status = ServiceStatus {
        service: "innomed",
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
        started_at: state.started_at,
    };
    ApiResponse::ok(&status, "InnoMed backend running")
}

/// GET /health
pub async fn health(State(state): State<SharedState>) -> Result<ApiResponse, ApiError> {
    let report = HealthReport {
        status: "healthy",
        uptime_seconds: (Utc::now() - state.started_at).num_seconds(),
        profiles: state.orchestrator.profile_count().await,
        history_entries: state.orchestrator.history_len().await,
        cached_items: state.cache.stats().await.cached_items,
        cache_enabled: state.cache.is_enabled(),
    };
    ApiResponse::ok(&report, "Healthy")
}
