//! Append-only log of answered queries.

use chrono::{DateTime, Utc};
use innomed_common::truncate_chars;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

/// Longest prompt prefix kept per entry.
pub const HISTORY_PROMPT_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub molecule: String,
    pub prompt: String,
    pub timestamp: DateTime<Utc>,
    pub elapsed_seconds: f64,
}

#[derive(Debug, Default)]
pub struct QueryHistory {
    entries: Mutex<Vec<HistoryEntry>>,
}

impl QueryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record(&self, molecule: &str, prompt: &str, elapsed_seconds: f64) -> HistoryEntry {
        let entry = HistoryEntry {
            molecule: molecule.to_string(),
            prompt: truncate_chars(prompt, HISTORY_PROMPT_CHARS),
            timestamp: Utc::now(),
            elapsed_seconds,
        };
        self.entries.lock().await.push(entry.clone());
        entry
    }

    /// Oldest first.
    pub async fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.lock().await.clone()
    }

    pub async fn clear(&self) -> usize {
        let mut guard = self.entries.lock().await;
        let n = guard.len();
        guard.clear();
        n
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_record_truncates_prompt() {
        let history = QueryHistory::new();
        let long = "x".repeat(250);
        let entry = history.record("Aspirin", &long, 0.5).await;
        assert_eq!(entry.prompt.chars().count(), HISTORY_PROMPT_CHARS);
        assert_eq!(history.len().await, 1);
    }

    #[tokio::test]
    async fn test_entries_keep_insertion_order() {
        let history = QueryHistory::new();
        history.record("Aspirin", "first", 0.1).await;
        history.record("Metformin", "second", 0.2).await;
        let molecules: Vec<_> = history.entries().await.into_iter().map(|e| e.molecule).collect();
        assert_eq!(molecules, vec!["Aspirin", "Metformin"]);
    }

    #[tokio::test]
    async fn test_clear_empties_log() {
        let history = QueryHistory::new();
        history.record("Aspirin", "p", 0.1).await;
        assert_eq!(history.clear().await, 1);
        assert!(history.is_empty().await);
    }
}
