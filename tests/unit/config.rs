//! Configuration loading and validation.

use std::fs;

use quarry::{Config, Error, IndexConfig, OverlapFormula, ScoringConfig, ZoneWeights};

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.index.kgram_size, 3);
    assert_eq!(config.index.temp_block_size, 5000);
    assert_eq!(config.index.terms_per_block, 64);
    assert!(!config.index.compress_blocks);
    assert_eq!(config.scoring.zone_weights, ZoneWeights { title: 0.4, body: 0.6 });
    assert_eq!(config.scoring.overlap_formula, OverlapFormula::CollectionFrequency);
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quarry.json");
    fs::write(
        &path,
        r#"{ "index": { "compress_blocks": true }, "scoring": { "zone_weights": { "title": 0.3 } } }"#,
    )
    .unwrap();

    let config = Config::from_json_file(&path).unwrap();
    assert!(config.index.compress_blocks);
    assert_eq!(config.index.terms_per_block, IndexConfig::default().terms_per_block);
    assert_eq!(config.scoring.zone_weights.title, 0.3);
    assert_eq!(config.scoring.zone_weights.body, 0.6);
}

#[test]
fn test_section_files_load_alone() {
    let dir = tempfile::tempdir().unwrap();
    let index_path = dir.path().join("index.json");
    fs::write(&index_path, r#"{ "kgram_size": 4, "threads": 2 }"#).unwrap();
    let index = IndexConfig::from_json_file(&index_path).unwrap();
    assert_eq!((index.kgram_size, index.threads), (4, 2));

    let scoring_path = dir.path().join("scoring.json");
    fs::write(&scoring_path, r#"{ "overlap_formula": "term_frequency" }"#).unwrap();
    let scoring = ScoringConfig::from_json_file(&scoring_path).unwrap();
    assert_eq!(scoring.overlap_formula, OverlapFormula::TermFrequency);
}

#[test]
fn test_invalid_values_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");

    fs::write(&path, r#"{ "index": { "terms_per_block": 0 } }"#).unwrap();
    assert!(matches!(Config::from_json_file(&path), Err(Error::InvalidConfig(_))));

    fs::write(&path, r#"{ "scoring": { "zone_weights": { "title": 0.9, "body": 0.6 } } }"#).unwrap();
    assert!(matches!(Config::from_json_file(&path), Err(Error::InvalidConfig(_))));
}

#[test]
fn test_malformed_json_names_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();
    match Config::from_json_file(&path) {
        Err(Error::Json { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected Json error, got {:?}", other),
    }
}
