//! PDF download for a stored profile.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use innomed_common::InnomedError;
use tracing::debug;

use crate::envelope::ApiError;
use crate::state::SharedState;

/// GET /report/{molecule}: renders a fresh report from the stored profile.
pub async fn download_report(
    State(state): State<SharedState>,
    Path(molecule): Path<String>,
) -> Result<Response, ApiError> {
    let handle = state
        .orchestrator
        .report_for(&molecule)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("MIT not found for {molecule}")))?;

    let bytes = tokio::fs::read(&handle.path).await.map_err(InnomedError::from)?;
    debug!(path = %handle.path.display(), bytes = bytes.len(), "Serving report");

    let disposition = format!("attachment; filename=\"{}\"", handle.filename);
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
