//! Shared types and configuration for the guidewatch change-detection pipeline.

pub mod app_config;
pub mod config;
pub mod snapshot;
pub mod sources;
pub mod summary;

use thiserror::Error;

pub use app_config::{AppConfig, DetectorConfig, Environment, DEFAULT_DIFF_THRESHOLD};
pub use config::{load_app_config, load_app_config_from_env};
pub use snapshot::{
    FeedItem, PersistedState, Snapshot, SnapshotContent, SnapshotFile, SnapshotFileItem,
    SnapshotKind, StateMap,
};
pub use sources::{load_sources, parse_sources, SourceCategory, SourceConfig, SourcesFile};
pub use summary::{ChangeRecord, RunSummary, SkippedSource};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read sources file {path}: {source}")]
    SourcesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse sources file: {0}")]
    SourcesFileParse(#[from] serde_yaml::Error),

    #[error("sources validation failed: {0}")]
    Validation(String),
}
