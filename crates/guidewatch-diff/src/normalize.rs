//! Canonical text for hashing and similarity scoring.
//!
//! Free text has volatile fragments (dates, clock times, "5 minutes ago")
//! replaced by placeholder tokens so a re-scrape of an unchanged page hashes
//! identically. Feed item lists are serialized verbatim, in order.

use std::sync::LazyLock;

use guidewatch_core::{FeedItem, SnapshotContent};
use regex::{NoExpand, Regex};

/// Separator between an item's title and its identifier.
pub const ITEM_FIELD_SEPARATOR: &str = "|";
/// Separator between items.
pub const ITEM_LINE_SEPARATOR: &str = "\n";

/// Ordered `(pattern, replacement)` rules applied to free text.
///
/// Whitespace is collapsed first so the later patterns only ever see single
/// spaces. Digits are spelled `[0-9]` to stay ASCII-only.
const VOLATILE_RULES: &[(&str, &str)] = &[
    (r"\s+", " "),
    (r"[0-9]{1,2}/[0-9]{1,2}/[0-9]{2,4}", "[DATE]"),
    (
        r"(?i)[0-9]{1,2}:[0-9]{2}(?::[0-9]{2})?(?:\s*(?:am|pm)\b)?",
        "[TIME]",
    ),
    (
        r"(?i)[0-9]+ (?:minutes?|hours?|days?) ago",
        "[RELATIVE_TIME]",
    ),
];

static COMPILED_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    VOLATILE_RULES
        .iter()
        .map(|(pattern, replacement)| {
            (
                Regex::new(pattern).expect("valid volatile-field regex"),
                *replacement,
            )
        })
        .collect()
});

/// Normalize free text: apply [`VOLATILE_RULES`] in order, trim, lower-case.
///
/// Total and idempotent: `normalize(&normalize(x)) == normalize(x)`.
#[must_use]
pub fn normalize(raw: &str) -> String {
    let mut text = raw.to_owned();
    for &(ref re, replacement) in COMPILED_RULES.iter() {
        text = re.replace_all(&text, NoExpand(replacement)).into_owned();
    }
    text.trim().to_lowercase()
}

/// Serialize feed items as `title|identifier` lines, preserving order.
#[must_use]
pub fn canonicalize_items(items: &[FeedItem]) -> String {
    items
        .iter()
        .map(|item| format!("{}{ITEM_FIELD_SEPARATOR}{}", item.title, item.identifier))
        .collect::<Vec<_>>()
        .join(ITEM_LINE_SEPARATOR)
}

/// Canonical form of a snapshot's content, branching on its kind.
#[must_use]
pub fn canonicalize(content: &SnapshotContent) -> String {
    match content {
        SnapshotContent::FreeText(text) => normalize(text),
        SnapshotContent::ItemList(items) => canonicalize_items(items),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
