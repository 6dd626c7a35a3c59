//! Axum router — maps all URL paths to handlers.

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{
    admin::{cache_stats, clear_cache, clear_history, get_history},
    mit::{clear_mit, get_mit},
    query::query_submit,
    report::download_report,
    system::{health, service_status},
};
use crate::sse::stream_query;
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        .route("/",       get(service_status))
        .route("/health", get(health))

        // Query pipeline
        .route("/query",        post(query_submit))
        .route("/stream-query", get(stream_query))

        // Stored profiles and reports
        .route("/mit",                delete(clear_mit))
        .route("/mit/{molecule}",     get(get_mit))
        .route("/report/{molecule}",  get(download_report))

        // Administration
        .route("/history",     get(get_history).delete(clear_history))
        .route("/cache",       delete(clear_cache))
        .route("/cache/stats", get(cache_stats))

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
