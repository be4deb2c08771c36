// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Posting lists: per-term documents with positions.
//!
//! Docs are keyed by [`DocId`] in a `BTreeMap`, so iteration is ascending by
//! id no matter which worker inserted first. Positions within a posting are
//! kept sorted and unique. Re-inserting a position that is already recorded
//! changes nothing, which keeps `frequency == positions.len()` true at all
//! times and makes replaying a token harmless.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{DocId, Position};

/// Lower bound for every idf weight. A term present in as many postings as
/// there are documents would otherwise weigh nothing (or less).
pub const IDF_FLOOR: f64 = 0.001;

/// `ln(docs / frequency)`, clamped to [`IDF_FLOOR`] when not positive.
pub fn inverse_document_frequency(docs: usize, frequency: u64) -> f64 {
    if docs == 0 || frequency == 0 {
        return IDF_FLOOR;
    }
    let idf = (docs as f64 / frequency as f64).ln();
    if idf > 0.0 {
        idf
    } else {
        IDF_FLOOR
    }
}

/// One term's occurrences in one document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    pub file: String,
    pub frequency: u32,
    pub positions: Vec<Position>,
    /// Per-document idf, assigned once the build is complete.
    pub idf: f64,
}

impl Posting {
    pub fn new(doc_id: DocId, file: impl Into<String>) -> Self {
        Self {
            doc_id,
            file: file.into(),
            ..Default::default()
        }
    }

    /// Record a position. Returns false if it was already present.
    pub fn add_position(&mut self, position: Position) -> bool {
        match self.positions.binary_search(&position) {
            Ok(_) => false,
            Err(at) => {
                self.positions.insert(at, position);
                self.frequency += 1;
                true
            }
        }
    }

    /// Fold in another posting's positions, returning how many were new.
    pub fn absorb_positions(&mut self, positions: &[Position]) -> u32 {
        let mut added = 0;
        for &position in positions {
            if self.add_position(position) {
                added += 1;
            }
        }
        added
    }
}

/// Everything known about one term.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PostingList {
    pub docs: BTreeMap<DocId, Posting>,
    pub total_frequency: u64,
    /// Collection-level idf, assigned once the build is complete.
    pub idf: f64,
}

/// Outcome of recording one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recorded {
    /// First occurrence of the term in this document.
    NewDocument,
    /// Another occurrence in a document already listed.
    NewPosition,
    /// This exact position was already recorded.
    Duplicate,
}

impl Recorded {
    pub fn is_new(self) -> bool {
        self != Recorded::Duplicate
    }
}

impl PostingList {
    pub fn docs_num(&self) -> usize {
        self.docs.len()
    }

    pub fn get(&self, doc_id: DocId) -> Option<&Posting> {
        self.docs.get(&doc_id)
    }

    pub fn doc_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.docs.keys().copied()
    }

    pub fn postings(&self) -> impl Iterator<Item = &Posting> {
        self.docs.values()
    }

    /// The single-token path used while indexing.
    pub fn record(&mut self, doc_id: DocId, file: &str, position: Position) -> Recorded {
        let outcome = match self.docs.entry(doc_id) {
            Entry::Vacant(slot) => {
                slot.insert(Posting::new(doc_id, file)).add_position(position);
                Recorded::NewDocument
            }
            Entry::Occupied(mut slot) => {
                if slot.get_mut().add_position(position) {
                    Recorded::NewPosition
                } else {
                    Recorded::Duplicate
                }
            }
        };
        if outcome.is_new() {
            self.total_frequency += 1;
        }
        outcome
    }

    /// Bulk merge of another list for the same term.
    ///
    /// New documents are taken wholesale; for documents already present the
    /// incoming positions are appended and frequencies grow by the number of
    /// positions actually added. Returns `(doc_id, added)` for every document
    /// whose frequency changed.
    pub fn merge(&mut self, other: PostingList) -> Vec<(DocId, u32)> {
        let mut changed = Vec::with_capacity(other.docs.len());
        for (doc_id, incoming) in other.docs {
            match self.docs.entry(doc_id) {
                Entry::Vacant(slot) => {
                    let added = incoming.frequency;
                    slot.insert(incoming);
                    self.total_frequency += u64::from(added);
                    changed.push((doc_id, added));
                }
                Entry::Occupied(mut slot) => {
                    let added = slot.get_mut().absorb_positions(&incoming.positions);
                    if added > 0 {
                        self.total_frequency += u64::from(added);
                        changed.push((doc_id, added));
                    }
                }
            }
        }
        changed
    }

    /// Assign collection idf and per-document idf against `docs_in_collection`.
    pub fn assign_idf(&mut self, docs_in_collection: usize) {
        self.idf = inverse_document_frequency(docs_in_collection, self.total_frequency);
        for posting in self.docs.values_mut() {
            posting.idf =
                inverse_document_frequency(docs_in_collection, u64::from(posting.frequency));
        }
    }
}
