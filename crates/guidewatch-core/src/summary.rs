//! Detector output: per-source change records and the run summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of checking one source during one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRecord {
    #[serde(rename = "source")]
    pub source_key: String,
    #[serde(rename = "name")]
    pub source_name: String,
    /// `1 - similarity` in `[0, 1]`; always 1.0 on first observation.
    pub change_score: f64,
    pub significant: bool,
    #[serde(rename = "initial", default, skip_serializing_if = "std::ops::Not::not")]
    pub is_initial: bool,
    /// Capture time of the snapshot this record was computed from.
    pub timestamp: DateTime<Utc>,
}

/// A configured source that could not be processed this run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedSource {
    #[serde(rename = "source")]
    pub source_key: String,
    #[serde(rename = "name")]
    pub source_name: String,
    pub reason: String,
}

/// Aggregate report for one detector invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub timestamp: DateTime<Utc>,
    pub has_significant_changes: bool,
    pub changes: Vec<ChangeRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedSource>,
}

impl RunSummary {
    /// Assemble a summary, deriving `has_significant_changes` from the records.
    #[must_use]
    pub fn new(
        timestamp: DateTime<Utc>,
        changes: Vec<ChangeRecord>,
        skipped: Vec<SkippedSource>,
    ) -> Self {
        let has_significant_changes = changes.iter().any(|c| c.significant);
        Self {
            timestamp,
            has_significant_changes,
            changes,
            skipped,
        }
    }

    pub fn significant(&self) -> impl Iterator<Item = &ChangeRecord> {
        self.changes.iter().filter(|c| c.significant)
    }

    #[must_use]
    pub fn record(&self, source_key: &str) -> Option<&ChangeRecord> {
        self.changes.iter().find(|c| c.source_key == source_key)
    }
}
