//! Reads the per-source snapshot documents written by the scraping step.

use std::collections::HashMap;
use std::path::Path;

use guidewatch_core::{SkippedSource, Snapshot, SnapshotFile, SourceConfig};

use crate::store::read_optional;

#[derive(Debug, Default)]
pub(crate) struct LoadedSnapshots {
    pub snapshots: HashMap<String, Snapshot>,
    /// Sources whose snapshot file exists but could not be used.
    pub failures: Vec<SkippedSource>,
}

/// Load `<dir>/<key>.json` for every configured source.
///
/// A missing file is left out of the map (the detector reports it). A file
/// that cannot be read or parsed is recorded in `failures`.
pub(crate) async fn load_snapshots(dir: &Path, sources: &[SourceConfig]) -> LoadedSnapshots {
    let mut loaded = LoadedSnapshots::default();

    for source in sources {
        let path = dir.join(format!("{}.json", source.key));
        let reason = match read_optional(&path).await {
            Ok(None) => continue,
            Ok(Some(body)) => match serde_json::from_str::<SnapshotFile>(&body) {
                Ok(file) => {
                    loaded
                        .snapshots
                        .insert(source.key.clone(), file.into_snapshot());
                    continue;
                }
                Err(e) => format!("invalid snapshot JSON: {e}"),
            },
            Err(e) => format!("unreadable snapshot file: {e}"),
        };

        tracing::warn!(source = %source.key, path = %path.display(), reason = %reason, "snapshot unusable");
        loaded.failures.push(SkippedSource {
            source_key: source.key.clone(),
            source_name: source.name.clone(),
            reason,
        });
    }

    loaded
}
