//! innomed-mit — Molecule Innovation Twin assembly, scoring and the query
//! pipeline.
//!
//! A query fans out to the six providers in `innomed-sources`, the results
//! are folded into a [`Profile`] by the [`ProfileBuilder`], scored by the
//! [`scorer`], kept in a [`ProfileStore`] and rendered through a
//! [`ReportGenerator`]. [`Orchestrator`] ties the steps together.

pub mod records;
pub mod profile;
pub mod weights;
pub mod scorer;
pub mod highlights;
pub mod builder;
pub mod store;
pub mod history;
pub mod extract;
pub mod report;
pub mod pipeline;

pub use builder::ProfileBuilder;
pub use history::{HistoryEntry, QueryHistory};
pub use pipeline::{Orchestrator, PipelineEvent, ProgressSender, ResultBundle, Stage};
pub use profile::{Profile, ProfileMetadata};
pub use report::{ReportGenerator, ReportHandle};
pub use scorer::{compute_innovation_score, score_breakdown, ScoreBreakdown};
pub use store::{InMemoryProfileStore, ProfileStore};
pub use weights::ScoreWeights;
