//! `detect` command: run change detection and publish the results.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::Context;
use guidewatch_core::{
    AppConfig, ChangeRecord, DetectorConfig, RunSummary, SkippedSource, SourceConfig, StateMap,
};
use guidewatch_diff::ChangeDetector;
use tokio::fs;

use crate::snapshots::load_snapshots;
use crate::store::StateStore;

/// Run change detection over all configured sources.
///
/// Loads snapshots and stored state from the data directory, runs the
/// detector, then (unless `dry_run`) persists changed state, writes
/// `changes.json`, and sets or clears the `.changes-detected` flag.
///
/// # Errors
///
/// Returns an error if the threshold override is invalid or any output file
/// cannot be written. Per-source problems are reported in the summary instead.
pub(crate) async fn run_detect(
    config: &AppConfig,
    sources: &[SourceConfig],
    threshold: Option<f64>,
    dry_run: bool,
) -> anyhow::Result<RunSummary> {
    let detector_config = match threshold {
        Some(t) => DetectorConfig::new(t)?,
        None => config.detector,
    };

    let loaded = load_snapshots(&config.snapshots_dir(), sources).await;
    let unusable: HashSet<&str> = loaded
        .failures
        .iter()
        .map(|f| f.source_key.as_str())
        .collect();
    let checkable: Vec<SourceConfig> = sources
        .iter()
        .filter(|s| !unusable.contains(s.key.as_str()))
        .cloned()
        .collect();

    let store = StateStore::new(config.hashes_dir());
    let before = store.load(sources).await;
    let mut state = before.clone();

    let detector = ChangeDetector::new(detector_config);
    tracing::info!(
        sources = sources.len(),
        threshold = detector.config().diff_threshold(),
        dry_run,
        "running change detection"
    );
    let mut summary = detector.detect_changes(&checkable, &loaded.snapshots, &mut state);
    let detector_skips = std::mem::take(&mut summary.skipped);
    summary.skipped = merge_skipped(sources, detector_skips, loaded.failures);

    println!("guidewatch change detection");
    for line in summary_lines(&summary, &before, &state) {
        println!("  {line}");
    }

    if dry_run {
        println!("dry-run: state, changes.json and flag file left untouched");
        return Ok(summary);
    }

    let written = store.save_changed(&before, &state).await?;
    tracing::debug!(written, "persisted source state");

    write_summary(&config.summary_path(), &summary).await?;
    update_flag(&config.flag_path(), summary.has_significant_changes).await?;

    if summary.has_significant_changes {
        println!(
            "significant changes detected in {} source(s)",
            summary.significant().count()
        );
    } else {
        println!("no significant changes detected");
    }

    Ok(summary)
}

/// Combine detector skips and snapshot load failures in configured source order.
fn merge_skipped(
    sources: &[SourceConfig],
    detector_skips: Vec<SkippedSource>,
    load_failures: Vec<SkippedSource>,
) -> Vec<SkippedSource> {
    let mut by_key: HashMap<String, SkippedSource> = detector_skips
        .into_iter()
        .chain(load_failures)
        .map(|s| (s.source_key.clone(), s))
        .collect();
    sources
        .iter()
        .filter_map(|source| by_key.remove(&source.key))
        .collect()
}

/// Console lines for a run: one per checked source, then one per skipped source.
fn summary_lines(summary: &RunSummary, before: &StateMap, after: &StateMap) -> Vec<String> {
    let mut lines: Vec<String> = summary
        .changes
        .iter()
        .map(|record| {
            let hash_moved = before.get(&record.source_key) != after.get(&record.source_key);
            record_line(record, hash_moved)
        })
        .collect();

    lines.extend(
        summary
            .skipped
            .iter()
            .map(|s| format!("[SKIP] {}: {}", s.source_name, s.reason)),
    );
    lines
}

fn record_line(record: &ChangeRecord, hash_moved: bool) -> String {
    let percent = record.change_score * 100.0;
    if record.is_initial {
        format!("[NEW] {}: initial snapshot saved", record.source_name)
    } else if !hash_moved {
        format!("[OK] {}: no changes", record.source_name)
    } else if record.significant {
        format!("[CHANGED] {}: {percent:.1}% different", record.source_name)
    } else {
        format!(
            "[MINOR] {}: {percent:.1}% different (below threshold)",
            record.source_name
        )
    }
}

async fn write_summary(path: &Path, summary: &RunSummary) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("create {}", parent.display()))?;
    }
    let body = serde_json::to_vec_pretty(summary).context("serialize run summary")?;
    fs::write(path, body)
        .await
        .with_context(|| format!("write {}", path.display()))
}

/// Create the flag file when there are significant changes; remove it otherwise.
async fn update_flag(path: &Path, significant: bool) -> anyhow::Result<()> {
    if significant {
        fs::write(path, "true")
            .await
            .with_context(|| format!("write {}", path.display()))
    } else {
        match fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("remove {}", path.display())),
        }
    }
}

#[cfg(test)]
#[path = "detect_test.rs"]
mod tests;
