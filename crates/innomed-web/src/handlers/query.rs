//! `POST /query`: validated, cached, full pipeline run.

use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use innomed_common::InnomedError;
use tracing::{debug, info};

use crate::envelope::{ApiError, ApiResponse, Envelope};
use crate::state::SharedState;
use crate::validate::{validate_query, QueryRequest};

pub async fn query_submit(
    State(state): State<SharedState>,
    body: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<ApiResponse, ApiError> {
    let Json(req) = body.map_err(|rejection| {
        ApiError::Validation(vec![format!("Invalid request body: {}", rejection.body_text())])
    })?;
    let query = validate_query(&req, &state.limits).map_err(ApiError::Validation)?;
    let cache_molecule = query.molecule.as_deref().unwrap_or_default();

    let t0 = Instant::now();
    if let Some(cached) = state.cache.get(cache_molecule, &query.prompt).await {
        // A cached answer is only valid while its profile is still stored
        let molecule = cached["molecule"].as_str().unwrap_or_default();
        let elapsed = t0.elapsed().as_secs_f64();
        if state.orchestrator.record_cached_answer(molecule, &query.prompt, elapsed).await {
            info!(molecule, "Serving cached analysis");
            return Ok(ApiResponse(Envelope::success(cached, "Analysis retrieved from cache")));
        }
        debug!(molecule, "Cached analysis is stale, rerunning pipeline");
    }

    let bundle = state
        .orchestrator
        .handle_query(&query.prompt, query.molecule.as_deref())
        .await?;
    let data = serde_json::to_value(&bundle).map_err(InnomedError::from)?;
    state.cache.set(cache_molecule, &query.prompt, data.clone()).await;

    Ok(ApiResponse(Envelope::success(data, "Analysis completed successfully")))
}
