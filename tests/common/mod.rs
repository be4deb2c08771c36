//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::path::Path;

use quarry::{spimi, Corpus, DiskIndex, PostingList};
use tempfile::TempDir;

// Re-export canonical test utilities from quarry::testing
pub use quarry::testing::{make_docs, raw_corpus, raw_tokens, write_files, SALES};

// ============================================================================
// FIXTURES
// ============================================================================

/// A small multi-document collection with a phrase, repeated terms and
/// near-miss spellings for fuzzy and phonetic lookups.
pub const LIBRARY: &[(&str, &str)] = &[
    ("hamlet.txt", "to be or not to be\nthat is the question"),
    ("home_sales.txt", "new home sales top forecasts\nhome sales rise in july"),
    ("macbeth.txt", "the thane of cawdor lives\na prosperous gentleman"),
    ("robert.txt", "robert and rupert went home"),
    ("weather.txt", "the weather report for july\nrain in the forecast"),
];

/// A temporary input directory holding `files`.
pub fn input_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("create input dir");
    write_files(dir.path(), files);
    dir
}

/// Build `files` to disk with the given block sizes and open the result.
pub fn disk_index(
    files: &[(&str, &str)],
    temp_block_size: usize,
    terms_per_block: usize,
) -> (TempDir, DiskIndex) {
    let input = input_dir(files);
    let output = tempfile::tempdir().expect("create output dir");
    spimi(input.path(), output.path(), temp_block_size, terms_per_block).expect("spimi build");
    let index = DiskIndex::open(output.path()).expect("open index");
    (output, index)
}

// ============================================================================
// ASSERTIONS
// ============================================================================

/// Assert the corpus holds every structural invariant, with a readable
/// failure message.
pub fn assert_corpus_well_formed(corpus: &Corpus) {
    if let Err(e) = corpus.check_well_formed() {
        panic!("corpus is not well formed: {}", e);
    }
}

/// Assert two posting lists agree on documents, positions and frequencies.
/// Idf is ignored.
pub fn assert_same_postings(left: &PostingList, right: &PostingList) {
    assert_eq!(left.total_frequency, right.total_frequency, "total frequency");
    let left_docs: Vec<_> = left.postings().map(|p| (p.doc_id, &p.positions, p.frequency)).collect();
    let right_docs: Vec<_> = right
        .postings()
        .map(|p| (p.doc_id, &p.positions, p.frequency))
        .collect();
    assert_eq!(left_docs, right_docs);
}

/// Files of the ranked documents, in rank order.
pub fn files_of(ranked: &[quarry::ScoredDoc]) -> Vec<&str> {
    ranked.iter().map(|s| s.file.as_str()).collect()
}

pub fn path_exists(dir: &Path, name: &str) -> bool {
    dir.join(name).exists()
}
