//! innomed-web — HTTP API for the InnoMed pipeline.
//! Provides:
//!   - Query submission with validation and response caching
//!   - Streaming query progress over SSE
//!   - Stored MIT lookup and PDF report download
//!   - History and cache administration

pub mod cache;
pub mod envelope;
pub mod handlers;
pub mod router;
pub mod sse;
pub mod state;
pub mod validate;

pub use cache::ResponseCache;
pub use router::build_router;
pub use state::{AppState, SharedState};
pub use validate::QueryLimits;
