//! Failure isolation around provider calls.
//!
//! Every provider runs in its own task under a per-domain timeout. An error,
//! a timeout, a panic, or a payload of the wrong shape all collapse into the
//! same outcome: no payload, a failure message, and a `warn!` event. Nothing
//! here retries.

use innomed_common::SourceKind;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::payloads::SourcePayloads;
use crate::set::SourceSet;
use crate::DataSource;

/// Per-domain fetch timeouts.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceTimeouts {
    pub market: Duration,
    pub trade: Duration,
    pub patents: Duration,
    pub trials: Duration,
    pub web: Duration,
    pub internal: Duration,
}

impl Default for SourceTimeouts {
    fn default() -> Self {
        Self {
            market:   Duration::from_secs(10),
            trade:    Duration::from_secs(10),
            patents:  Duration::from_secs(15),
            trials:   Duration::from_secs(15),
            web:      Duration::from_secs(20),
            internal: Duration::from_secs(10),
        }
    }
}

impl SourceTimeouts {
    /// Same timeout for every domain.
    pub fn uniform(timeout: Duration) -> Self {
        Self {
            market: timeout,
            trade: timeout,
            patents: timeout,
            trials: timeout,
            web: timeout,
            internal: timeout,
        }
    }

    pub fn for_kind(&self, kind: SourceKind) -> Duration {
        match kind {
            SourceKind::Market   => self.market,
            SourceKind::Trade    => self.trade,
            SourceKind::Patents  => self.patents,
            SourceKind::Trials   => self.trials,
            SourceKind::Web      => self.web,
            SourceKind::Internal => self.internal,
        }
    }
}

/// Result of one guarded provider call.
#[derive(Debug, Clone, Serialize)]
pub struct SourceOutcome {
    pub kind: SourceKind,
    /// `None` when the provider failed in any way.
    pub payload: Option<Value>,
    pub error: Option<String>,
    pub elapsed_ms: u64,
}

impl SourceOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// The payload, or the domain's neutral value on failure.
    pub fn value_or_neutral(&self) -> Value {
        self.payload.clone().unwrap_or_else(|| self.kind.neutral())
    }

    /// Warning line surfaced to callers for a failed source.
    pub fn warning(&self) -> Option<String> {
        self.error
            .as_ref()
            .map(|e| format!("{} source unavailable: {e}", self.kind))
    }
}

/// Invoke one provider with failure isolation. Never returns an error.
pub async fn safe_fetch(
    source: Arc<dyn DataSource>,
    molecule: &str,
    timeout: Duration,
) -> SourceOutcome {
    let kind = source.kind();
    let t0 = Instant::now();
    let owned = molecule.to_string();

    let mut handle = tokio::spawn(async move { source.fetch(&owned).await });

    let result: Result<Value, String> = match tokio::time::timeout(timeout, &mut handle).await {
        Ok(Ok(Ok(value))) if kind.accepts(&value) => Ok(value),
        Ok(Ok(Ok(value))) => Err(format!(
            "malformed payload: expected {}, got {}",
            if kind.is_list() { "array" } else { "object" },
            json_type(&value)
        )),
        Ok(Ok(Err(e))) => Err(format!("{e:#}")),
        Ok(Err(join_err)) => Err(format!("provider task failed: {join_err}")),
        Err(_) => {
            handle.abort();
            Err(format!("timed out after {}ms", timeout.as_millis()))
        }
    };
    let elapsed_ms = t0.elapsed().as_millis() as u64;

    match result {
        Ok(value) => {
            debug!(source = %kind, molecule, elapsed_ms, "Source fetch complete");
            SourceOutcome { kind, payload: Some(value), error: None, elapsed_ms }
        }
        Err(msg) => {
            warn!(
                source = %kind,
                molecule,
                error = %msg,
                elapsed_ms,
                "Source fetch failed, substituting neutral default"
            );
            SourceOutcome { kind, payload: None, error: Some(msg), elapsed_ms }
        }
    }
}

fn json_type(v: &Value) -> &'static str {
    match v {
        Value::Null      => "null",
        Value::Bool(_)   => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_)  => "array",
        Value::Object(_) => "object",
    }
}

/// All six outcomes of one fan-out, in [`SourceKind::ALL`] order.
#[derive(Debug, Clone, Serialize)]
pub struct FetchReport {
    pub outcomes: Vec<SourceOutcome>,
}

impl FetchReport {
    pub fn payloads(&self) -> SourcePayloads {
        SourcePayloads::from_outcomes(&self.outcomes)
    }

    pub fn warnings(&self) -> Vec<String> {
        self.outcomes.iter().filter_map(SourceOutcome::warning).collect()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_ok()).count()
    }
}

/// Query all six providers concurrently and join before returning.
pub async fn fetch_all(sources: &SourceSet, molecule: &str, timeouts: &SourceTimeouts) -> FetchReport {
    let fetch = |kind: SourceKind| safe_fetch(sources.get(kind), molecule, timeouts.for_kind(kind));

    let (market, trade, patents, trials, web, internal) = tokio::join!(
        fetch(SourceKind::Market),
        fetch(SourceKind::Trade),
        fetch(SourceKind::Patents),
        fetch(SourceKind::Trials),
        fetch(SourceKind::Web),
        fetch(SourceKind::Internal),
    );

    FetchReport { outcomes: vec![market, trade, patents, trials, web, internal] }
}
