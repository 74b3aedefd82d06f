//! Change detection over scraped guide content.
//!
//! Snapshots are canonicalized ([`normalize`]), fingerprinted
//! ([`fingerprint`]) and, when the fingerprint moved, scored with a
//! word-set Jaccard distance ([`similarity`]). [`ChangeDetector`] ties the
//! steps together per source and produces a [`guidewatch_core::RunSummary`].

pub mod detector;
pub mod error;
pub mod fingerprint;
pub mod normalize;
pub mod similarity;

pub use detector::ChangeDetector;
pub use error::DetectError;
pub use fingerprint::fingerprint;
pub use normalize::{canonicalize, canonicalize_items, normalize};
pub use similarity::{change_score, similarity};
