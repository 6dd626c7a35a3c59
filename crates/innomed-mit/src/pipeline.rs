//! End-to-end query pipeline.
//!
//! Orchestrates a single query:
//!   1. Resolve the molecule (explicit value, prompt extraction, placeholder)
//!   2. Normalize it
//!   3. Fetch all six sources concurrently through the safe wrapper
//!   4. Build and score the profile
//!   5. Store it (overwriting any previous profile for the molecule)
//!   6. Render the report
//!   7. Append a history entry
//!
//! Stage transitions are logged at debug level and, when a progress channel
//! is supplied, sent as [`PipelineEvent`]s for streaming clients.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use innomed_common::{normalize_molecule, InnomedError, Result, SourceKind};
use innomed_sources::{fetch_all, SourcePayloads, SourceSet, SourceTimeouts};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::builder::ProfileBuilder;
use crate::extract::resolve_molecule;
use crate::history::{HistoryEntry, QueryHistory};
use crate::profile::Profile;
use crate::report::{ReportGenerator, ReportHandle};
use crate::store::ProfileStore;

// ── Progress events ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Start,
    Fetching,
    Building,
    Scored,
    Stored,
    Done,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Start    => "start",
            Stage::Fetching => "fetching",
            Stage::Building => "building",
            Stage::Scored   => "scored",
            Stage::Stored   => "stored",
            Stage::Done     => "done",
        }
    }
}

/// Progress event for one pipeline run.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PipelineEvent {
    Status { stage: Stage, molecule: String },
    Agent { agent: SourceKind, ok: bool, data: Value },
    Mit { data: Box<Profile> },
    Report { data: ReportHandle },
}

impl PipelineEvent {
    /// SSE event name.
    pub fn name(&self) -> &'static str {
        match self {
            PipelineEvent::Status { .. } => "status",
            PipelineEvent::Agent { .. }  => "agent",
            PipelineEvent::Mit { .. }    => "mit",
            PipelineEvent::Report { .. } => "report",
        }
    }
}

pub type ProgressSender = mpsc::UnboundedSender<PipelineEvent>;

// ── Result bundle ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ResultBundle {
    pub query_id: Uuid,
    pub molecule: String,
    #[serde(flatten)]
    pub payloads: SourcePayloads,
    pub mit: Profile,
    pub report: ReportHandle,
    /// One line per provider that failed, timed out or returned garbage.
    pub warnings: Vec<String>,
    pub elapsed_seconds: f64,
}

// ── Orchestrator ──────────────────────────────────────────────────────────────

pub struct Orchestrator {
    sources: SourceSet,
    timeouts: SourceTimeouts,
    builder: ProfileBuilder,
    store: Arc<dyn ProfileStore>,
    history: QueryHistory,
    reporter: Arc<dyn ReportGenerator>,
    /// Last report per molecule, keyed like the store and tagged with the
    /// `created_at` of the profile it was rendered from.
    reports: RwLock<HashMap<String, (DateTime<Utc>, ReportHandle)>>,
}

impl Orchestrator {
    pub fn new(
        sources: SourceSet,
        store: Arc<dyn ProfileStore>,
        reporter: Arc<dyn ReportGenerator>,
    ) -> Self {
        Self {
            sources,
            timeouts: SourceTimeouts::default(),
            builder: ProfileBuilder::default(),
            store,
            history: QueryHistory::new(),
            reporter,
            reports: RwLock::default(),
        }
    }

    pub fn with_timeouts(mut self, timeouts: SourceTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn with_builder(mut self, builder: ProfileBuilder) -> Self {
        self.builder = builder;
        self
    }

    pub fn timeouts(&self) -> &SourceTimeouts {
        &self.timeouts
    }

    pub async fn handle_query(&self, prompt: &str, molecule: Option<&str>) -> Result<ResultBundle> {
        self.handle_query_with_progress(prompt, molecule, None).await
    }

    #[instrument(skip(self, prompt, progress))]
    pub async fn handle_query_with_progress(
        &self,
        prompt: &str,
        molecule: Option<&str>,
        progress: Option<ProgressSender>,
    ) -> Result<ResultBundle> {
        let t0 = Instant::now();
        let query_id = Uuid::new_v4();

        let emit = |event: PipelineEvent| {
            if let Some(tx) = &progress {
                let _ = tx.send(event);
            }
        };
        let stage = |stage: Stage, molecule: &str| {
            debug!(%query_id, stage = stage.as_str(), molecule, "pipeline stage");
            emit(PipelineEvent::Status { stage, molecule: molecule.to_string() });
        };

        let molecule = normalize_molecule(&resolve_molecule(prompt, molecule));
        info!(%query_id, molecule = %molecule, "Starting query");
        stage(Stage::Start, &molecule);

        // ── 1. Fetch ──────────────────────────────────────────────────────────
        stage(Stage::Fetching, &molecule);
        let fetched = fetch_all(&self.sources, &molecule, &self.timeouts).await;
        for outcome in &fetched.outcomes {
            emit(PipelineEvent::Agent {
                agent: outcome.kind,
                ok: outcome.is_ok(),
                data: outcome.value_or_neutral(),
            });
        }
        let payloads = fetched.payloads();
        let warnings = fetched.warnings();
        if !warnings.is_empty() {
            warn!(%query_id, failed = warnings.len(), "Some sources were unavailable");
        }

        // ── 2. Build + score ──────────────────────────────────────────────────
        stage(Stage::Building, &molecule);
        let profile = self.builder.build(&molecule, &payloads)?;
        stage(Stage::Scored, &molecule);
        emit(PipelineEvent::Mit { data: Box::new(profile.clone()) });

        // ── 3. Store ──────────────────────────────────────────────────────────
        self.store.put(&molecule, profile.clone()).await?;
        stage(Stage::Stored, &molecule);

        // ── 4. Report ─────────────────────────────────────────────────────────
        let report = self.render(&profile).await?;
        emit(PipelineEvent::Report { data: report.clone() });

        let elapsed_seconds = t0.elapsed().as_secs_f64();
        self.history.record(&molecule, prompt, elapsed_seconds).await;
        stage(Stage::Done, &molecule);

        info!(
            %query_id,
            molecule = %molecule,
            score = profile.innovation_score(),
            failed_sources = warnings.len(),
            elapsed_ms = (elapsed_seconds * 1000.0) as u64,
            "Query complete"
        );

        Ok(ResultBundle {
            query_id,
            molecule,
            payloads,
            mit: profile,
            report,
            warnings,
            elapsed_seconds,
        })
    }

    async fn render(&self, profile: &Profile) -> Result<ReportHandle> {
        let reporter = Arc::clone(&self.reporter);
        let owned = profile.clone();
        let handle = tokio::task::spawn_blocking(move || reporter.generate(&owned))
            .await
            .map_err(|e| InnomedError::Report(format!("report task failed: {e}")))?
            .map_err(|e| InnomedError::Report(format!("{e:#}")))?;

        self.reports.write().await.insert(
            profile.molecule().to_string(),
            (profile.metadata().created_at, handle.clone()),
        );
        Ok(handle)
    }

    /// Latest stored profile for `molecule` (any casing).
    pub async fn get_profile(&self, molecule: &str) -> Option<Profile> {
        self.store.get(molecule).await
    }

    /// Report for the stored profile, `None` if nothing is stored. The file
    /// rendered for that exact profile is reused while it still exists on disk.
    pub async fn report_for(&self, molecule: &str) -> Result<Option<ReportHandle>> {
        let Some(profile) = self.store.get(molecule).await else {
            return Ok(None);
        };
        let existing = self.reports.read().await.get(profile.molecule()).cloned();
        if let Some((built_from, handle)) = existing {
            if built_from == profile.metadata().created_at && handle.path.exists() {
                debug!(molecule = profile.molecule(), path = %handle.path.display(), "reusing report");
                return Ok(Some(handle));
            }
        }
        self.render(&profile).await.map(Some)
    }

    /// Log a query answered without running the pipeline. Only succeeds
    /// while the profile it was answered from is still stored.
    pub async fn record_cached_answer(&self, molecule: &str, prompt: &str, elapsed_seconds: f64) -> bool {
        if self.store.get(molecule).await.is_none() {
            return false;
        }
        self.history.record(&normalize_molecule(molecule), prompt, elapsed_seconds).await;
        true
    }

    pub async fn history(&self) -> Vec<HistoryEntry> {
        self.history.entries().await
    }

    pub async fn history_len(&self) -> usize {
        self.history.len().await
    }

    pub async fn clear_history(&self) -> usize {
        let n = self.history.clear().await;
        info!(removed = n, "Query history cleared");
        n
    }

    pub async fn clear_profiles(&self) -> usize {
        self.reports.write().await.clear();
        let n = self.store.clear().await;
        info!(removed = n, "Profile store cleared");
        n
    }

    pub async fn profile_count(&self) -> usize {
        self.store.len().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::RecordingReportGenerator;
    use crate::store::InMemoryProfileStore;
    use innomed_sources::mock::StaticSource;
    use serde_json::json;
    use std::time::Duration;

    fn orchestrator_with(sources: SourceSet, reporter: Arc<dyn ReportGenerator>) -> Orchestrator {
        Orchestrator::new(sources, Arc::new(InMemoryProfileStore::new()), reporter)
    }

    #[tokio::test]
    async fn test_query_extracts_and_normalizes_molecule() {
        let orch = orchestrator_with(SourceSet::embedded(), Arc::new(RecordingReportGenerator::new()));
        let bundle = orch.handle_query("innovation outlook for metformin", None).await.unwrap();
        assert_eq!(bundle.molecule, "Metformin");
        assert_eq!(bundle.mit.molecule(), "Metformin");
        assert!(bundle.warnings.is_empty());
        assert!(orch.get_profile("METFORMIN").await.is_some());
        assert_eq!(orch.history_len().await, 1);
    }

    #[tokio::test]
    async fn test_unresolvable_prompt_uses_placeholder() {
        let orch = orchestrator_with(SourceSet::embedded(), Arc::new(RecordingReportGenerator::new()));
        let bundle = orch.handle_query("tell me something", None).await.unwrap();
        assert_eq!(bundle.molecule, "Unknown Molecule");
    }

    #[tokio::test]
    async fn test_report_failure_propagates() {
        let orch = orchestrator_with(
            SourceSet::embedded(),
            Arc::new(RecordingReportGenerator::failing("disk full")),
        );
        let err = orch.handle_query("x", Some("Aspirin")).await.unwrap_err();
        assert!(matches!(err, InnomedError::Report(ref m) if m.contains("disk full")));
        // The profile was stored before the report step
        assert!(orch.get_profile("aspirin").await.is_some());
        assert_eq!(orch.history_len().await, 0);
    }

    #[tokio::test]
    async fn test_progress_events_follow_stage_order() {
        let orch = orchestrator_with(SourceSet::embedded(), Arc::new(RecordingReportGenerator::new()));
        let (tx, mut rx) = mpsc::unbounded_channel();
        orch.handle_query_with_progress("p", Some("Aspirin"), Some(tx)).await.unwrap();

        let mut stages = Vec::new();
        let mut agents = 0;
        let mut saw_mit = false;
        let mut saw_report = false;
        while let Ok(event) = rx.try_recv() {
            match event {
                PipelineEvent::Status { stage, .. } => stages.push(stage),
                PipelineEvent::Agent { .. } => agents += 1,
                PipelineEvent::Mit { .. } => saw_mit = true,
                PipelineEvent::Report { .. } => saw_report = true,
            }
        }
        assert_eq!(
            stages,
            vec![Stage::Start, Stage::Fetching, Stage::Building, Stage::Scored, Stage::Stored, Stage::Done]
        );
        assert_eq!(agents, 6);
        assert!(saw_mit && saw_report);
    }

    #[tokio::test]
    async fn test_slow_source_times_out_without_failing_query() {
        let sources = SourceSet::embedded().replace(Arc::new(
            StaticSource::ok(SourceKind::Web, json!({"top_papers": [1, 2, 3]}))
                .with_delay(Duration::from_secs(5)),
        ));
        let orch = orchestrator_with(sources, Arc::new(RecordingReportGenerator::new()))
            .with_timeouts(SourceTimeouts::uniform(Duration::from_millis(200)));
        let bundle = orch.handle_query("p", Some("Aspirin")).await.unwrap();
        assert_eq!(bundle.warnings.len(), 1);
        assert!(bundle.warnings[0].starts_with("web source unavailable"));
        assert_eq!(bundle.payloads.web, Value::Null);
        assert_eq!(bundle.mit.paper_count(), 0);
    }

    #[tokio::test]
    async fn test_cached_answer_requires_stored_profile() {
        let orch = orchestrator_with(SourceSet::embedded(), Arc::new(RecordingReportGenerator::new()));
        assert!(!orch.record_cached_answer("Aspirin", "p", 0.0).await);
        assert_eq!(orch.history_len().await, 0);

        orch.handle_query("p", Some("Aspirin")).await.unwrap();
        assert!(orch.record_cached_answer("aspirin", "again", 0.0).await);
        let history = orch.history().await;
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].molecule, "Aspirin");

        orch.clear_profiles().await;
        assert!(!orch.record_cached_answer("Aspirin", "p", 0.0).await);
        assert_eq!(orch.history_len().await, 2);
    }

    #[tokio::test]
    async fn test_report_for_rerenders_when_file_is_missing() {
        let reporter = Arc::new(RecordingReportGenerator::new());
        let orch = orchestrator_with(SourceSet::embedded(), reporter.clone());
        orch.handle_query("p", Some("Aspirin")).await.unwrap();

        // Recorded handles never exist on disk
        assert!(orch.report_for("aspirin").await.unwrap().is_some());
        assert_eq!(reporter.rendered(), vec!["Aspirin", "Aspirin"]);
    }

    #[tokio::test]
    async fn test_report_for_unknown_molecule_is_none() {
        let orch = orchestrator_with(SourceSet::embedded(), Arc::new(RecordingReportGenerator::new()));
        assert!(orch.report_for("Nothing").await.unwrap().is_none());
    }

    #[test]
    fn test_event_names() {
        let e = PipelineEvent::Status { stage: Stage::Start, molecule: "A".into() };
        assert_eq!(e.name(), "status");
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v, json!({"type": "status", "stage": "start", "molecule": "A"}));
    }
}
