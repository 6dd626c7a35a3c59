//! Server-Sent Events (SSE) streaming of a single query's progress.
//!
//! Event names: `status` per pipeline stage, `agent` per provider, `mit`,
//! `report`, then exactly one of `done` (with the full bundle) or `error`.

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use futures_core::Stream;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_stream::StreamExt;
use tracing::warn;

use crate::envelope::ApiError;
use crate::state::SharedState;
use crate::validate::{validate_query, QueryRequest};

fn json_event<T: Serialize>(name: &str, data: &T) -> Event {
    Event::default().event(name).json_data(data).unwrap_or_else(|e| {
        warn!(event = name, error = %e, "Failed to serialise SSE payload");
        Event::default().event("error").data(format!("serialisation failed: {e}"))
    })
}

/// GET /stream-query?molecule=..&prompt=..
pub async fn stream_query(
    State(state): State<SharedState>,
    Query(req): Query<QueryRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let query = validate_query(&req, &state.limits).map_err(ApiError::Validation)?;

    let (out_tx, out_rx) = mpsc::unbounded_channel::<Event>();
    let orchestrator = state.orchestrator.clone();

    tokio::spawn(async move {
        let (progress_tx, mut progress_rx) = mpsc::unbounded_channel();
        let run = orchestrator.handle_query_with_progress(
            &query.prompt,
            query.molecule.as_deref(),
            Some(progress_tx),
        );
        let forward = async {
            while let Some(event) = progress_rx.recv().await {
                let _ = out_tx.send(json_event(event.name(), &event));
            }
        };
        let (result, ()) = tokio::join!(run, forward);

        let last = match result {
            Ok(bundle) => json_event("done", &bundle),
            Err(e) => {
                warn!(error = %e, "Streamed query failed");
                json_event("error", &serde_json::json!({ "message": e.to_string() }))
            }
        };
        let _ = out_tx.send(last);
    });

    let stream = UnboundedReceiverStream::new(out_rx).map(Ok::<Event, Infallible>);
    Ok(Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    ))
}
