use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::snapshot::SnapshotKind;
use crate::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceCategory {
    Guide,
    News,
    Community,
}

impl std::fmt::Display for SourceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceCategory::Guide => write!(f, "guide"),
            SourceCategory::News => write!(f, "news"),
            SourceCategory::Community => write!(f, "community"),
        }
    }
}

/// One monitored upstream site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Stable identifier; also names the snapshot and state files on disk.
    pub key: String,
    pub name: String,
    pub url: String,
    /// When set, the scraping step reads this feed instead of the page.
    #[serde(default)]
    pub feed_url: Option<String>,
    pub priority: u8,
    pub category: SourceCategory,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl SourceConfig {
    /// Shape of snapshot the scraping step produces for this source.
    #[must_use]
    pub fn expected_kind(&self) -> SnapshotKind {
        if self.feed_url.is_some() {
            SnapshotKind::ItemList
        } else {
            SnapshotKind::FreeText
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SourcesFile {
    pub sources: Vec<SourceConfig>,
}

/// Load and validate the monitored sources from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_sources(path: &Path) -> Result<SourcesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SourcesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_sources(&content)
}

/// Parse and validate sources from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_sources(content: &str) -> Result<SourcesFile, ConfigError> {
    let sources_file: SourcesFile =
        serde_yaml::from_str(content).map_err(ConfigError::SourcesFileParse)?;

    validate_sources(&sources_file)?;

    Ok(sources_file)
}

fn validate_sources(sources_file: &SourcesFile) -> Result<(), ConfigError> {
    let mut seen_keys = HashSet::new();

    for source in &sources_file.sources {
        if source.key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "source key must be non-empty".to_string(),
            ));
        }

        // Keys become file names under the data directory.
        if !source
            .key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ConfigError::Validation(format!(
                "source key '{}' may only contain ASCII letters, digits, '-' and '_'",
                source.key
            )));
        }

        if source.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "source '{}' must have a non-empty name",
                source.key
            )));
        }

        if ![1, 2, 3].contains(&source.priority) {
            return Err(ConfigError::Validation(format!(
                "source '{}' has invalid priority {}; must be 1, 2, or 3",
                source.key, source.priority
            )));
        }

        if !seen_keys.insert(source.key.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate source key: '{}'",
                source.key
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "sources_test.rs"]
mod tests;
