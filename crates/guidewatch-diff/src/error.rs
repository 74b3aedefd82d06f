use guidewatch_core::SnapshotKind;
use thiserror::Error;

/// Per-source failures. None of these abort a run.
#[derive(Debug, Error)]
pub enum DetectError {
    #[error("no snapshot found")]
    SnapshotMissing,

    #[error("snapshot kind {actual} does not match configured kind {expected}")]
    KindMismatch {
        expected: SnapshotKind,
        actual: SnapshotKind,
    },

    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),

    #[error("stored state is corrupt: {0}")]
    StateCorrupt(String),
}
