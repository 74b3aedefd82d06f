//! Per-source change detection and run summary assembly.
//!
//! The detector is pure over its inputs: snapshots and prior state are
//! supplied by the caller, and the caller persists the updated state map.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use guidewatch_core::{
    ChangeRecord, DetectorConfig, PersistedState, RunSummary, SkippedSource, Snapshot,
    SnapshotContent, SourceConfig, StateMap,
};

use crate::error::DetectError;
use crate::fingerprint::fingerprint;
use crate::normalize::canonicalize;
use crate::similarity::change_score;

/// How a source's current content relates to its stored state.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Verdict {
    Initial,
    Unchanged,
    Changed(f64),
}

#[derive(Debug, Clone, Default)]
pub struct ChangeDetector {
    config: DetectorConfig,
}

impl ChangeDetector {
    #[must_use]
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Check every source against its snapshot and prior state, stamping the
    /// summary with the current time.
    ///
    /// See [`ChangeDetector::detect_changes_at`].
    pub fn detect_changes(
        &self,
        sources: &[SourceConfig],
        snapshots: &HashMap<String, Snapshot>,
        state: &mut StateMap,
    ) -> RunSummary {
        self.detect_changes_at(sources, snapshots, state, Utc::now())
    }

    /// Check every source, in the order given, and update `state` in place.
    ///
    /// A source whose content hash moved (or that has never been seen) gets
    /// its state entry replaced with the new hash and canonical content.
    /// Unchanged sources keep their entry untouched. A source that fails is
    /// listed in [`RunSummary::skipped`] and its state entry is left as is;
    /// other sources are still processed.
    pub fn detect_changes_at(
        &self,
        sources: &[SourceConfig],
        snapshots: &HashMap<String, Snapshot>,
        state: &mut StateMap,
        run_timestamp: DateTime<Utc>,
    ) -> RunSummary {
        let mut changes = Vec::with_capacity(sources.len());
        let mut skipped = Vec::new();

        for source in sources {
            match self.check_source(source, snapshots.get(&source.key), state) {
                Ok(record) => changes.push(record),
                Err(e) => {
                    tracing::warn!(
                        source = %source.key,
                        name = %source.name,
                        error = %e,
                        "skipping source"
                    );
                    skipped.push(SkippedSource {
                        source_key: source.key.clone(),
                        source_name: source.name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let summary = RunSummary::new(run_timestamp, changes, skipped);
        tracing::info!(
            checked = summary.changes.len(),
            skipped = summary.skipped.len(),
            significant = summary.has_significant_changes,
            "change detection finished"
        );
        summary
    }

    fn check_source(
        &self,
        source: &SourceConfig,
        snapshot: Option<&Snapshot>,
        state: &mut StateMap,
    ) -> Result<ChangeRecord, DetectError> {
        let snapshot = snapshot.ok_or(DetectError::SnapshotMissing)?;
        validate_snapshot(source, snapshot)?;
        tracing::debug!(
            source = %source.key,
            title = snapshot.title.as_deref().unwrap_or_default(),
            kind = %snapshot.kind(),
            "checking snapshot"
        );

        let canonical = canonicalize(&snapshot.content);
        let new_hash = fingerprint(&canonical);

        let verdict = match usable_prior(source, state) {
            None => Verdict::Initial,
            Some(prior) if prior.hash == new_hash => Verdict::Unchanged,
            Some(prior) => Verdict::Changed(change_score(
                &prior.previous_canonical_content,
                &canonical,
            )),
        };

        let threshold = self.config.diff_threshold();
        let (change_score, significant, is_initial) = match verdict {
            Verdict::Initial => {
                tracing::info!(source = %source.key, "initial snapshot recorded");
                (1.0, true, true)
            }
            Verdict::Unchanged => {
                tracing::debug!(source = %source.key, "no changes");
                (0.0, false, false)
            }
            Verdict::Changed(score) => {
                let significant = score >= threshold;
                if significant {
                    tracing::info!(source = %source.key, score, "significant change");
                } else {
                    tracing::info!(source = %source.key, score, threshold, "minor change below threshold");
                }
                (score, significant, false)
            }
        };

        if verdict != Verdict::Unchanged {
            state.insert(
                source.key.clone(),
                PersistedState {
                    hash: new_hash,
                    previous_canonical_content: canonical,
                },
            );
        }

        Ok(ChangeRecord {
            source_key: source.key.clone(),
            source_name: source.name.clone(),
            change_score,
            significant,
            is_initial,
            timestamp: snapshot.timestamp,
        })
    }
}

/// The stored entry for `source`, or `None` when absent or corrupt.
///
/// A corrupt entry is treated as if the source had never been seen.
fn usable_prior<'a>(source: &SourceConfig, state: &'a StateMap) -> Option<&'a PersistedState> {
    let prior = state.get(&source.key)?;
    if prior.is_well_formed() {
        Some(prior)
    } else {
        let err = DetectError::StateCorrupt(format!(
            "hash {:?} is not a 64-character hex digest",
            prior.hash
        ));
        tracing::warn!(source = %source.key, error = %err, "treating source as first run");
        None
    }
}

fn validate_snapshot(source: &SourceConfig, snapshot: &Snapshot) -> Result<(), DetectError> {
    if snapshot.source_key != source.key {
        return Err(DetectError::MalformedSnapshot(format!(
            "snapshot belongs to '{}'",
            snapshot.source_key
        )));
    }

    let expected = source.expected_kind();
    let actual = snapshot.kind();
    if expected != actual {
        return Err(DetectError::KindMismatch { expected, actual });
    }

    if let SnapshotContent::ItemList(items) = &snapshot.content {
        if let Some(idx) = items
            .iter()
            .position(|item| item.title.trim().is_empty() && item.identifier.trim().is_empty())
        {
            return Err(DetectError::MalformedSnapshot(format!(
                "feed item {idx} has neither a title nor an identifier"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "detector_test.rs"]
mod tests;
