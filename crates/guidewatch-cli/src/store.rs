//! File-backed prior state: one `<key>.hash` and one `<key>.prev` per source.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use guidewatch_core::{PersistedState, SourceConfig, StateMap};
use tokio::fs;

pub(crate) struct StateStore {
    dir: PathBuf,
}

impl StateStore {
    pub(crate) fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn hash_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.hash"))
    }

    fn prev_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.prev"))
    }

    /// Load stored state for the configured sources.
    ///
    /// A source with no hash file is absent. A hash without its `.prev`
    /// companion, or files that cannot be read, are logged and left out so the
    /// source falls back to first-run handling.
    pub(crate) async fn load(&self, sources: &[SourceConfig]) -> StateMap {
        let mut state = StateMap::new();

        for source in sources {
            let hash = match read_optional(&self.hash_path(&source.key)).await {
                Ok(Some(hash)) => hash,
                Ok(None) => continue,
                Err(e) => {
                    tracing::warn!(source = %source.key, error = %e, "unreadable hash file; treating as absent");
                    continue;
                }
            };

            match read_optional(&self.prev_path(&source.key)).await {
                Ok(Some(previous_canonical_content)) => {
                    state.insert(
                        source.key.clone(),
                        PersistedState {
                            hash: hash.trim().to_string(),
                            previous_canonical_content,
                        },
                    );
                }
                Ok(None) => {
                    tracing::warn!(source = %source.key, "hash file has no previous content; treating as absent");
                }
                Err(e) => {
                    tracing::warn!(source = %source.key, error = %e, "unreadable previous content; treating as absent");
                }
            }
        }

        state
    }

    /// Write every entry of `after` that differs from `before`.
    ///
    /// Returns the number of sources written.
    ///
    /// # Errors
    ///
    /// Returns an error if the state directory or a state file cannot be written.
    pub(crate) async fn save_changed(
        &self,
        before: &StateMap,
        after: &StateMap,
    ) -> anyhow::Result<usize> {
        fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("create state dir {}", self.dir.display()))?;

        let mut written = 0;
        for (key, entry) in after {
            if before.get(key) == Some(entry) {
                continue;
            }
            // Content before hash: a torn write leaves a stale hash, which the
            // next run simply sees as a change.
            let prev_path = self.prev_path(key);
            fs::write(&prev_path, &entry.previous_canonical_content)
                .await
                .with_context(|| format!("write {}", prev_path.display()))?;
            let hash_path = self.hash_path(key);
            fs::write(&hash_path, &entry.hash)
                .await
                .with_context(|| format!("write {}", hash_path.display()))?;
            written += 1;
        }

        Ok(written)
    }
}

/// Read a file, mapping "not found" to `None`.
pub(crate) async fn read_optional(path: &Path) -> std::io::Result<Option<String>> {
    match fs::read_to_string(path).await {
        Ok(s) => Ok(Some(s)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
