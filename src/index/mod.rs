// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Inverted index: posting lists, the in-memory corpus and intersections.
//!
//! # Structure
//!
//! ```text
//! Corpus
//! ├── postings   term → PostingList ─┬─ total_frequency, idf
//! │                                  └─ DocId → Posting { positions, frequency, idf }
//! ├── kgrams     gram → {term}          (wildcards)
//! ├── phonetic   soundex → {term}       (sound-alikes)
//! ├── trie       char trie of terms     (fuzzy)
//! └── vectors    DocId → term → count   (cosine)
//! ```
//!
//! Scoring does not care where postings live. It talks to [`PostingsLookup`],
//! which both [`Corpus`] and the disk-backed `DiskIndex` implement.

mod corpus;
mod intersect;
mod invariants;
mod postings;
mod vectors;

pub use corpus::Corpus;
pub use intersect::{
    intersect, intersect_all, intersect_postings, position_pairs, positional_intersect,
    PositionalMatch,
};
pub use invariants::{check_postings, InvariantError};
pub use postings::{inverse_document_frequency, Posting, PostingList, Recorded, IDF_FLOOR};
pub use vectors::{DocumentEntry, DocumentTable, DocumentVectors};

use crate::error::Result;
use crate::types::DocId;

/// Read access to postings and per-document statistics.
pub trait PostingsLookup {
    /// The posting list of `term`, or `None` if it is not in the vocabulary.
    /// Fails only when backing storage cannot be read.
    fn posting_list(&self, term: &str) -> Result<Option<PostingList>>;

    /// Number of documents in the collection.
    fn document_count(&self) -> usize;

    fn file(&self, doc_id: DocId) -> Option<String>;

    /// `count / document length` for `term` in `doc_id`.
    fn normalized_frequency(&self, doc_id: DocId, term: &str) -> Option<f64>;
}
