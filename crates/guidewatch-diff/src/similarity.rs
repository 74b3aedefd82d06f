//! Word-set Jaccard similarity between two canonical strings.
//!
//! Deliberately coarse: tokens are whitespace-split, order and repetition are
//! ignored. The score only gates downstream work.

use std::collections::HashSet;

/// Sizes of the intersection and union of the whitespace-separated token
/// sets of `previous` and `current`.
fn overlap(previous: &str, current: &str) -> (usize, usize) {
    let before: HashSet<&str> = previous.split_whitespace().collect();
    let after: HashSet<&str> = current.split_whitespace().collect();
    (
        before.intersection(&after).count(),
        before.union(&after).count(),
    )
}

/// Token counts are bounded by input length; far below f64's exact integer
/// range for any realistic page.
#[allow(clippy::cast_precision_loss)]
fn ratio(numerator: usize, denominator: usize) -> f64 {
    numerator as f64 / denominator as f64
}

/// `|A ∩ B| / |A ∪ B|` over the whitespace-separated token sets of `previous`
/// and `current`. Two empty token sets are identical (1.0).
#[must_use]
pub fn similarity(previous: &str, current: &str) -> f64 {
    match overlap(previous, current) {
        (_, 0) => 1.0,
        (intersection, union) => ratio(intersection, union),
    }
}

/// Jaccard distance `|A ∪ B \ A ∩ B| / |A ∪ B|`: 0 for identical token sets,
/// 1 for disjoint ones.
///
/// Divides the counts directly, not `1 - similarity`, so the score is the
/// correctly rounded quotient.
#[must_use]
pub fn change_score(previous: &str, current: &str) -> f64 {
    match overlap(previous, current) {
        (_, 0) => 0.0,
        (intersection, union) => ratio(union - intersection, union),
    }
}
