//! Lazy block loading, verification and damaged files.

use std::fs;

use super::common::{disk_index, LIBRARY};
use quarry::storage::{BLOCKS_DIR, TREE_FILE};
use quarry::{DiskIndex, Error, PostingsLookup};

#[test]
fn test_blocks_load_on_demand() {
    let (_dir, index) = disk_index(LIBRARY, 8, 4);
    assert_eq!(index.cached_blocks(), 0);

    assert!(index.posting_list("absent").unwrap().is_none());
    assert_eq!(index.cached_blocks(), 0);

    index.posting_list("home").unwrap();
    assert_eq!(index.cached_blocks(), 1);
    index.posting_list("home").unwrap();
    assert_eq!(index.cached_blocks(), 1);

    let blocks = index.tree().blocks().len();
    for term in index.tree().vocabulary() {
        index.posting_list(term).unwrap();
    }
    assert_eq!(index.cached_blocks(), blocks);
}

#[test]
fn test_verify_summaries() {
    let (_dir, index) = disk_index(LIBRARY, 8, 4);
    let summaries = index.verify().unwrap();
    assert_eq!(summaries.len(), index.tree().blocks().len());
    assert_eq!(
        summaries.iter().map(|s| s.terms).collect::<Vec<_>>(),
        index.tree().terms_per_block()
    );
    assert!(summaries.iter().all(|s| s.bytes > 0 && s.postings >= s.terms));
}

#[test]
fn test_damaged_block_is_reported() {
    let (dir, index) = disk_index(LIBRARY, 8, 4);
    let name = index.tree().block_for("home").unwrap().to_string();
    let path = dir.path().join(BLOCKS_DIR).join(&name);

    let mut bytes = fs::read(&path).unwrap();
    let middle = bytes.len() / 2;
    bytes[middle] ^= 0x40;
    fs::write(&path, bytes).unwrap();

    match index.posting_list("home") {
        Err(Error::CorruptBlock { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected a corrupt block error, got {other:?}"),
    }
    assert!(matches!(index.verify(), Err(Error::CorruptBlock { .. })));
}

#[test]
fn test_missing_block_is_io_error() {
    let (dir, index) = disk_index(LIBRARY, 8, 4);
    let name = index.tree().block_for("july").unwrap().to_string();
    fs::remove_file(dir.path().join(BLOCKS_DIR).join(name)).unwrap();
    assert!(matches!(index.posting_list("july"), Err(Error::Io { .. })));
}

#[test]
fn test_open_without_tree_fails() {
    let (dir, _) = disk_index(LIBRARY, 8, 4);
    fs::remove_file(dir.path().join(TREE_FILE)).unwrap();
    assert!(matches!(DiskIndex::open(dir.path()), Err(Error::Io { .. })));
}

#[test]
fn test_damaged_tree_is_rejected() {
    let (dir, _) = disk_index(LIBRARY, 8, 4);
    let path = dir.path().join(TREE_FILE);
    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() - 3]).unwrap();
    assert!(matches!(DiskIndex::open(dir.path()), Err(Error::CorruptBlock { .. })));
}

#[test]
fn test_document_table_survives_round_trip() {
    let (_dir, index) = disk_index(LIBRARY, 8, 4);
    assert_eq!(index.document_count(), LIBRARY.len());
    assert_eq!(index.file(quarry::DocId(3)).as_deref(), Some("robert.txt"));
    // robert.txt has five tokens, "home" once.
    let ndf = index.normalized_frequency(quarry::DocId(3), "home").unwrap();
    assert!((ndf - 0.2).abs() < 1e-12);
}
