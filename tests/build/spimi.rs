//! SPIMI builds to disk.

use std::fs;

use super::common::{assert_same_postings, input_dir, make_docs, path_exists, LIBRARY};
use quarry::storage::{BLOCKS_DIR, TEMP_DIR, TREE_FILE};
use quarry::{build_index, spimi, DiskIndex, Error, IndexConfig, PostingsLookup, SpimiBuilder};

fn word_count(files: &[(&str, &str)]) -> usize {
    files.iter().map(|(_, text)| text.split_whitespace().count()).sum()
}

#[test]
fn test_disk_build_matches_in_memory_build() {
    let input = input_dir(LIBRARY);
    let output = tempfile::tempdir().unwrap();
    spimi(input.path(), output.path(), 7, 5).unwrap();

    let disk = DiskIndex::open(output.path()).unwrap();
    let memory = build_index(&make_docs(LIBRARY));

    assert_eq!(disk.document_count(), memory.document_count());
    assert_eq!(disk.tree().vocabulary().collect::<Vec<_>>(), memory.vocabulary());
    for term in memory.vocabulary() {
        let expected = memory.posting_list(&term).unwrap().unwrap();
        let actual = disk.posting_list(&term).unwrap().unwrap();
        assert_same_postings(&actual, &expected);
        assert!((actual.idf - expected.idf).abs() < 1e-12, "idf of {term}");
    }
}

#[test]
fn test_report_counts() {
    let input = input_dir(LIBRARY);
    let output = tempfile::tempdir().unwrap();
    let config = IndexConfig {
        temp_block_size: 7,
        terms_per_block: 5,
        ..IndexConfig::default()
    };
    let (tree, report) = SpimiBuilder::new(config).build(input.path(), output.path()).unwrap();

    let tokens = word_count(LIBRARY);
    assert_eq!(report.documents, LIBRARY.len());
    assert_eq!(report.skipped, 0);
    assert_eq!(report.tokens, tokens);
    assert_eq!(report.temp_blocks, tokens.div_ceil(7));
    assert_eq!(report.terms, tree.term_count());
    assert_eq!(report.blocks, tree.term_count().div_ceil(5));
    assert_eq!(report.blocks, tree.blocks().len());
    assert!(report.bytes_written > 0);
}

#[test]
fn test_output_layout() {
    let input = input_dir(LIBRARY);
    let output = tempfile::tempdir().unwrap();
    let tree = spimi(input.path(), output.path(), 10, 4).unwrap();

    assert!(path_exists(output.path(), TREE_FILE));
    assert!(!path_exists(output.path(), TEMP_DIR));
    assert!(!path_exists(output.path(), "blocks.partial"));
    assert!(!path_exists(output.path(), "index.tree.partial"));

    let blocks = fs::read_dir(output.path().join(BLOCKS_DIR)).unwrap().count();
    assert_eq!(blocks, tree.blocks().len());

    let sizes = tree.terms_per_block();
    assert!(sizes[..sizes.len() - 1].iter().all(|&n| n == 4));
    assert!(*sizes.last().unwrap() <= 4);
}

#[test]
fn test_compressed_blocks_read_back() {
    let input = input_dir(LIBRARY);
    let plain_out = tempfile::tempdir().unwrap();
    let packed_out = tempfile::tempdir().unwrap();

    spimi(input.path(), plain_out.path(), 16, 8).unwrap();
    let config = IndexConfig {
        temp_block_size: 16,
        terms_per_block: 8,
        compress_blocks: true,
        ..IndexConfig::default()
    };
    SpimiBuilder::new(config).build(input.path(), packed_out.path()).unwrap();

    let plain = DiskIndex::open(plain_out.path()).unwrap();
    let packed = DiskIndex::open(packed_out.path()).unwrap();
    assert!(packed.verify().is_ok());
    for term in plain.tree().vocabulary() {
        assert_same_postings(
            &packed.posting_list(term).unwrap().unwrap(),
            &plain.posting_list(term).unwrap().unwrap(),
        );
    }
}

#[test]
fn test_fixed_thread_count() {
    let input = input_dir(LIBRARY);
    let output = tempfile::tempdir().unwrap();
    let config = IndexConfig {
        threads: 2,
        temp_block_size: 5,
        ..IndexConfig::default()
    };
    let (tree, _) = SpimiBuilder::new(config).build(input.path(), output.path()).unwrap();
    assert_eq!(tree.term_count(), build_index(&make_docs(LIBRARY)).term_count());
}

#[test]
fn test_rebuild_replaces_previous_index() {
    let output = tempfile::tempdir().unwrap();
    let first = input_dir(&[("a.txt", "alpha beta")]);
    let second = input_dir(&[("b.txt", "gamma delta"), ("c.txt", "delta")]);

    spimi(first.path(), output.path(), 100, 1).unwrap();
    spimi(second.path(), output.path(), 100, 1).unwrap();

    let index = DiskIndex::open(output.path()).unwrap();
    assert_eq!(index.tree().vocabulary().collect::<Vec<_>>(), vec!["delta", "gamma"]);
    assert_eq!(index.document_count(), 2);
    assert_eq!(index.verify().unwrap().len(), 2);
}

#[test]
fn test_failed_build_keeps_previous_index() {
    let output = tempfile::tempdir().unwrap();
    let input = input_dir(&[("a.txt", "alpha beta")]);
    spimi(input.path(), output.path(), 100, 10).unwrap();

    let missing = input.path().join("missing");
    let result = spimi(&missing, output.path(), 100, 10);
    assert!(matches!(result, Err(Error::InputDirectory { .. })));

    let index = DiskIndex::open(output.path()).unwrap();
    assert_eq!(index.intersect("alpha", "beta").unwrap().len(), 1);
}

#[test]
fn test_empty_input_builds_empty_index() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let tree = spimi(input.path(), output.path(), 10, 10).unwrap();
    assert_eq!(tree.term_count(), 0);
    assert!(tree.blocks().is_empty());

    let index = DiskIndex::open(output.path()).unwrap();
    assert_eq!(index.document_count(), 0);
    assert!(index.wildcard_search("a*").is_empty());
}

#[test]
fn test_skipped_file_counts_in_report() {
    let input = input_dir(&[("a.txt", "alpha"), ("c.txt", "gamma")]);
    fs::write(input.path().join("b.bin"), [0xFF, 0xFE, 0xC3]).unwrap();
    let output = tempfile::tempdir().unwrap();

    let (_, report) = SpimiBuilder::new(IndexConfig::default())
        .build(input.path(), output.path())
        .unwrap();
    assert_eq!(report.documents, 2);
    assert_eq!(report.skipped, 1);

    let index = DiskIndex::open(output.path()).unwrap();
    let gamma = index.posting_list("gamma").unwrap().unwrap();
    assert_eq!(gamma.postings().next().map(|p| p.file.as_str()), Some("c.txt"));
}
