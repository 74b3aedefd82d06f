//! Point-in-time captures of a source and the state carried between runs.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapshotKind {
    /// Prose content that is normalized before hashing.
    FreeText,
    /// Ordered feed entries; order is part of the signal.
    ItemList,
}

impl std::fmt::Display for SnapshotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotKind::FreeText => write!(f, "free-text"),
            SnapshotKind::ItemList => write!(f, "item-list"),
        }
    }
}

/// A discrete feed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    pub title: String,
    /// Link or other stable identifier of the entry.
    pub identifier: String,
}

impl FeedItem {
    pub fn new(title: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            identifier: identifier.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotContent {
    FreeText(String),
    ItemList(Vec<FeedItem>),
}

impl SnapshotContent {
    #[must_use]
    pub fn kind(&self) -> SnapshotKind {
        match self {
            SnapshotContent::FreeText(_) => SnapshotKind::FreeText,
            SnapshotContent::ItemList(_) => SnapshotKind::ItemList,
        }
    }
}

/// Content captured for one source during the current run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub source_key: String,
    pub title: Option<String>,
    pub content: SnapshotContent,
    pub timestamp: DateTime<Utc>,
}

impl Snapshot {
    pub fn free_text(
        source_key: impl Into<String>,
        text: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            source_key: source_key.into(),
            title: None,
            content: SnapshotContent::FreeText(text.into()),
            timestamp,
        }
    }

    pub fn item_list(
        source_key: impl Into<String>,
        items: Vec<FeedItem>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            source_key: source_key.into(),
            title: None,
            content: SnapshotContent::ItemList(items),
            timestamp,
        }
    }

    #[must_use]
    pub fn kind(&self) -> SnapshotKind {
        self.content.kind()
    }
}

/// Feed entry as written by the scraping step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotFileItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub pub_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// On-disk JSON document produced per source by the scraping step.
///
/// Page captures carry `textContent`; feed captures set `type: "rss"` and
/// carry `items`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotFile {
    pub source: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, rename = "type")]
    pub snapshot_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text_content: Option<String>,
    #[serde(default)]
    pub structured_data: Option<serde_json::Value>,
    #[serde(default)]
    pub content_length: Option<u64>,
    #[serde(default)]
    pub items: Vec<SnapshotFileItem>,
}

impl SnapshotFile {
    #[must_use]
    pub fn is_feed(&self) -> bool {
        self.snapshot_type.as_deref() == Some("rss")
    }

    /// Convert the file document into the detector's snapshot model.
    ///
    /// Feed documents keep only `(title, link)` per item; page documents keep
    /// the text content, with a missing body treated as empty.
    #[must_use]
    pub fn into_snapshot(self) -> Snapshot {
        let content = if self.is_feed() {
            SnapshotContent::ItemList(
                self.items
                    .into_iter()
                    .map(|item| FeedItem::new(item.title, item.link))
                    .collect(),
            )
        } else {
            SnapshotContent::FreeText(self.text_content.unwrap_or_default())
        };

        Snapshot {
            source_key: self.source,
            title: self.title,
            content,
            timestamp: self.timestamp,
        }
    }
}

/// Durable per-source state carried between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    /// Hex SHA-256 of `previous_canonical_content`.
    pub hash: String,
    pub previous_canonical_content: String,
}

impl PersistedState {
    /// A stored hash must be 64 lowercase hex characters to be trusted.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.hash.len() == 64
            && self
                .hash
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    }
}

/// Prior state keyed by source key.
pub type StateMap = BTreeMap<String, PersistedState>;
