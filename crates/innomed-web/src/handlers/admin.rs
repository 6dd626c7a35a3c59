//! History and cache administration.

use axum::extract::State;
use serde_json::json;

use crate::envelope::{ApiError, ApiResponse};
use crate::state::SharedState;

/// GET /history
pub async fn get_history(State(state): State<SharedState>) -> Result<ApiResponse, ApiError> {
    let entries = state.orchestrator.history().await;
    ApiResponse::ok(&entries, format!("{} queries in history", entries.len()))
}

/// DELETE /history
pub async fn clear_history(State(state): State<SharedState>) -> Result<ApiResponse, ApiError> {
    let removed = state.orchestrator.clear_history().await;
    ApiResponse::ok(&json!({ "removed": removed }), "History cleared")
}

/// GET /cache/stats
pub async fn cache_stats(State(state): State<SharedState>) -> Result<ApiResponse, ApiError> {
    ApiResponse::ok(&state.cache.stats().await, "Cache statistics")
}

/// DELETE /cache
pub async fn clear_cache(State(state): State<SharedState>) -> Result<ApiResponse, ApiError> {
    let removed = state.cache.clear().await;
    ApiResponse::ok(&json!({ "removed": removed }), "Cache cleared")
}
