//! Stored profile lookup and administration.

use axum::extract::{Path, State};
use serde_json::json;

use crate::envelope::{ApiError, ApiResponse};
use crate::state::SharedState;

/// GET /mit/{molecule}
pub async fn get_mit(
    State(state): State<SharedState>,
    Path(molecule): Path<String>,
) -> Result<ApiResponse, ApiError> {
    match state.orchestrator.get_profile(&molecule).await {
        Some(profile) => ApiResponse::ok(&profile, "MIT retrieved"),
        None => Err(ApiError::NotFound(format!("MIT not found for {molecule}"))),
    }
}

/// DELETE /mit: also empties the response cache.
pub async fn clear_mit(State(state): State<SharedState>) -> Result<ApiResponse, ApiError> {
    let removed = state.orchestrator.clear_profiles().await;
    // Cached answers point at the profiles just removed
    state.cache.clear().await;
    ApiResponse::ok(&json!({ "removed": removed }), "Profile store cleared")
}
