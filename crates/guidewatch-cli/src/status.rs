//! `status` command: what the next `detect` run will see.

use anyhow::Context;
use guidewatch_core::{AppConfig, PersistedState, SourceConfig};

use crate::store::StateStore;

/// Print one line per configured source.
///
/// # Errors
///
/// Returns an error if the snapshot directory cannot be inspected.
pub(crate) async fn run_status(config: &AppConfig, sources: &[SourceConfig]) -> anyhow::Result<()> {
    let state = StateStore::new(config.hashes_dir()).load(sources).await;
    let snapshots_dir = config.snapshots_dir();

    println!(
        "{} sources, threshold {:.2}",
        sources.len(),
        config.detector.diff_threshold()
    );
    for source in sources {
        let snapshot_path = snapshots_dir.join(format!("{}.json", source.key));
        let has_snapshot = tokio::fs::try_exists(&snapshot_path)
            .await
            .with_context(|| format!("inspect {}", snapshot_path.display()))?;
        println!(
            "  {}",
            status_line(source, has_snapshot, state.get(&source.key))
        );
    }

    Ok(())
}

fn status_line(source: &SourceConfig, has_snapshot: bool, state: Option<&PersistedState>) -> String {
    let snapshot = if has_snapshot { "yes" } else { "no" };
    let hash = state.map_or("none", |s| s.hash.get(..12).unwrap_or(s.hash.as_str()));
    format!(
        "{:<12} {:<24} category={:<9} kind={:<9} snapshot={snapshot:<3} hash={hash}",
        source.key,
        source.name,
        source.category.to_string(),
        source.expected_kind().to_string(),
    )
}
