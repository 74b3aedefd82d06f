//! Multi-run detection scenarios driven through the public API.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use guidewatch_core::{
    DetectorConfig, RunSummary, Snapshot, SourceCategory, SourceConfig, StateMap,
};
use guidewatch_diff::{fingerprint, normalize, ChangeDetector};

fn alpha() -> SourceConfig {
    SourceConfig {
        key: "alpha".to_string(),
        name: "Alpha Guide".to_string(),
        url: "https://alpha.example/guide".to_string(),
        feed_url: None,
        priority: 1,
        category: SourceCategory::Guide,
        keywords: Vec::new(),
    }
}

fn run(
    detector: &ChangeDetector,
    state: &mut StateMap,
    text: &str,
    captured_at: &str,
) -> RunSummary {
    let captured_at: DateTime<Utc> = captured_at.parse().unwrap();
    let snapshots: HashMap<String, Snapshot> = [(
        "alpha".to_string(),
        Snapshot::free_text("alpha", text, captured_at),
    )]
    .into();
    detector.detect_changes(&[alpha()], &snapshots, state)
}

#[test]
fn three_run_scenario() {
    let detector = ChangeDetector::new(DetectorConfig::new(0.05).unwrap());
    let mut state = StateMap::new();

    // Run 1: never seen before.
    let first = run(
        &detector,
        &mut state,
        "Season 11 patch notes for Blood Wave.",
        "2025-11-02T00:00:00Z",
    );
    assert!(first.has_significant_changes);
    assert_eq!(first.changes.len(), 1);
    let record = &first.changes[0];
    assert_eq!(record.source_key, "alpha");
    assert!(record.is_initial);
    assert!(record.significant);
    assert!((record.change_score - 1.0).abs() < f64::EPSILON);

    let stored = state.get("alpha").cloned().unwrap();
    assert_eq!(
        stored.previous_canonical_content,
        normalize("Season 11 patch notes for Blood Wave.")
    );
    assert_eq!(stored.hash, fingerprint(&stored.previous_canonical_content));

    // Run 2: identical text.
    let second = run(
        &detector,
        &mut state,
        "Season 11 patch notes for Blood Wave.",
        "2025-11-02T06:00:00Z",
    );
    let record = &second.changes[0];
    assert!(!record.significant);
    assert!(!record.is_initial);
    assert!(record.change_score.abs() < f64::EPSILON);
    assert!(!second.has_significant_changes);
    assert_eq!(state.get("alpha"), Some(&stored));

    // Run 3: new guidance appended.
    let third = run(
        &detector,
        &mut state,
        "Season 11 patch notes for Blood Wave and Corpse Explosion buffs.",
        "2025-11-02T12:00:00Z",
    );
    let record = &third.changes[0];
    assert!(record.change_score > 0.05);
    assert!(record.significant);
    assert!(third.has_significant_changes);
    assert_ne!(state.get("alpha").map(|s| s.hash.as_str()), Some(stored.hash.as_str()));
}

#[test]
fn state_round_trips_through_json_between_runs() {
    let detector = ChangeDetector::default();
    let mut state = StateMap::new();
    run(&detector, &mut state, "Blood Wave", "2025-11-02T00:00:00Z");

    let persisted = serde_json::to_string(&state).unwrap();
    let mut restored: StateMap = serde_json::from_str(&persisted).unwrap();

    let summary = run(&detector, &mut restored, "Blood  Wave", "2025-11-02T06:00:00Z");
    assert!(!summary.has_significant_changes);
}

#[test]
fn lost_state_makes_every_source_initial_again() {
    let detector = ChangeDetector::default();
    let mut state = StateMap::new();
    run(&detector, &mut state, "Blood Wave", "2025-11-02T00:00:00Z");

    let mut fresh = StateMap::new();
    let summary = run(&detector, &mut fresh, "Blood Wave", "2025-11-02T06:00:00Z");
    assert!(summary.changes[0].is_initial);
    assert!(summary.has_significant_changes);
}
