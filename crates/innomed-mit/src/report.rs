//! Report collaborator interface.
//!
//! Rendering lives in `innomed-report`; the pipeline only needs a handle to
//! whatever artifact was produced.

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::profile::Profile;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportHandle {
    pub path: PathBuf,
    pub filename: String,
    pub created_at: DateTime<Utc>,
}

/// Renders a profile into a downloadable artifact. Synchronous; callers on
/// the async runtime should run it on a blocking thread.
pub trait ReportGenerator: Send + Sync {
    fn generate(&self, profile: &Profile) -> anyhow::Result<ReportHandle>;
}

/// Records what it was asked to render without touching the filesystem.
#[derive(Debug, Default)]
pub struct RecordingReportGenerator {
    rendered: Mutex<Vec<String>>,
    fail_with: Option<String>,
}

impl RecordingReportGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self { rendered: Mutex::default(), fail_with: Some(message.into()) }
    }

    /// Molecules rendered so far, in call order.
    pub fn rendered(&self) -> Vec<String> {
        self.rendered.lock().map(|g| g.clone()).unwrap_or_default()
    }
}

impl ReportGenerator for RecordingReportGenerator {
    fn generate(&self, profile: &Profile) -> anyhow::Result<ReportHandle> {
        if let Some(msg) = &self.fail_with {
            anyhow::bail!("{msg}");
        }
        if let Ok(mut guard) = self.rendered.lock() {
            guard.push(profile.molecule().to_string());
        }
        let created_at = Utc::now();
        let filename = format!(
            "{}_summary_{}.txt",
            profile.molecule().replace(' ', "_"),
            created_at.timestamp_millis()
        );
        Ok(ReportHandle { path: PathBuf::from(&filename), filename, created_at })
    }
}
