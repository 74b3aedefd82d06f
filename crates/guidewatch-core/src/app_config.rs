use std::path::PathBuf;

use crate::ConfigError;

/// Fraction of changed content that counts as a significant update.
pub const DEFAULT_DIFF_THRESHOLD: f64 = 0.05;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Tuning for a single detection run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorConfig {
    diff_threshold: f64,
}

impl DetectorConfig {
    /// Build a detector config, rejecting thresholds outside the open interval `(0, 1)`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] when `diff_threshold` is not strictly
    /// between 0 and 1 (NaN included).
    pub fn new(diff_threshold: f64) -> Result<Self, ConfigError> {
        if diff_threshold > 0.0 && diff_threshold < 1.0 {
            Ok(Self { diff_threshold })
        } else {
            Err(ConfigError::Validation(format!(
                "diff threshold {diff_threshold} must be strictly between 0 and 1"
            )))
        }
    }

    #[must_use]
    pub fn diff_threshold(&self) -> f64 {
        self.diff_threshold
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            diff_threshold: DEFAULT_DIFF_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub data_dir: PathBuf,
    pub sources_path: PathBuf,
    pub detector: DetectorConfig,
}

impl AppConfig {
    /// Directory the scraping step writes `<key>.json` snapshots into.
    #[must_use]
    pub fn snapshots_dir(&self) -> PathBuf {
        self.data_dir.join("sources")
    }

    /// Directory holding the per-source `.hash` / `.prev` state files.
    #[must_use]
    pub fn hashes_dir(&self) -> PathBuf {
        self.data_dir.join("hashes")
    }

    #[must_use]
    pub fn summary_path(&self) -> PathBuf {
        self.data_dir.join("changes.json")
    }

    /// Marker file consumed by CI to decide whether to run the extraction step.
    #[must_use]
    pub fn flag_path(&self) -> PathBuf {
        self.data_dir.join(".changes-detected")
    }
}
