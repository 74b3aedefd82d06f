use super::*;

const VALID_YAML: &str = r"
sources:
  - key: maxroll
    name: Maxroll
    url: https://maxroll.gg/d4/build-guides/blood-wave-necromancer-guide
    priority: 1
    category: guide
  - key: blizzard
    name: Blizzard Patch Notes
    url: https://news.blizzard.com/en-us/diablo4
    feed_url: https://news.blizzard.com/en-us/diablo4/feed
    priority: 1
    category: news
    keywords: [patch, hotfix, necromancer]
";

fn source(key: &str, name: &str, priority: u8) -> SourceConfig {
    SourceConfig {
        key: key.to_string(),
        name: name.to_string(),
        url: "https://example.com".to_string(),
        feed_url: None,
        priority,
        category: SourceCategory::Guide,
        keywords: Vec::new(),
    }
}

#[test]
fn parse_sources_accepts_valid_file() {
    let file = parse_sources(VALID_YAML).unwrap();
    assert_eq!(file.sources.len(), 2);
    assert_eq!(file.sources[0].key, "maxroll");
    assert!(file.sources[0].keywords.is_empty());
    assert_eq!(file.sources[1].category, SourceCategory::News);
    assert_eq!(file.sources[1].keywords.len(), 3);
}

#[test]
fn expected_kind_follows_feed_url() {
    let file = parse_sources(VALID_YAML).unwrap();
    assert_eq!(file.sources[0].expected_kind(), SnapshotKind::FreeText);
    assert_eq!(file.sources[1].expected_kind(), SnapshotKind::ItemList);
}

#[test]
fn parse_sources_rejects_bad_yaml() {
    let result = parse_sources("sources: [not: valid: yaml");
    assert!(matches!(result, Err(ConfigError::SourcesFileParse(_))));
}

#[test]
fn parse_sources_rejects_unknown_category() {
    let yaml = "sources:\n  - key: a\n    name: A\n    url: u\n    priority: 1\n    category: forum\n";
    assert!(matches!(
        parse_sources(yaml),
        Err(ConfigError::SourcesFileParse(_))
    ));
}

#[test]
fn validate_rejects_empty_key() {
    let file = SourcesFile {
        sources: vec![source("  ", "Maxroll", 1)],
    };
    let err = validate_sources(&file).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("key must be non-empty")));
}

#[test]
fn validate_rejects_path_like_key() {
    let file = SourcesFile {
        sources: vec![source("../etc", "Sneaky", 1)],
    };
    let err = validate_sources(&file).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("may only contain")));
}

#[test]
fn validate_rejects_empty_name() {
    let file = SourcesFile {
        sources: vec![source("maxroll", "", 1)],
    };
    let err = validate_sources(&file).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("non-empty name")));
}

#[test]
fn validate_rejects_priority_out_of_range() {
    let file = SourcesFile {
        sources: vec![source("maxroll", "Maxroll", 4)],
    };
    let err = validate_sources(&file).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("invalid priority 4")));
}

#[test]
fn validate_rejects_duplicate_keys_case_insensitively() {
    let file = SourcesFile {
        sources: vec![source("icyVeins", "Icy Veins", 2), source("icyveins", "Icy", 2)],
    };
    let err = validate_sources(&file).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("duplicate source key")));
}

#[test]
fn load_sources_reports_missing_file() {
    let err = load_sources(Path::new("/definitely/not/here/sources.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::SourcesFileIo { ref path, .. } if path.contains("sources.yaml")));
}
