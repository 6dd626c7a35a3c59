//! innomed-common — Shared types, errors, and helpers used across all InnoMed crates.

pub mod error;
pub mod source;
pub mod normalise;

// Re-export commonly used types
pub use error::{InnomedError, Result};
pub use source::{SourceKind, AGENTS_USED};
pub use normalise::{normalize_molecule, title_case, truncate_chars};
