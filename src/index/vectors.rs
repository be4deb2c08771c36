// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-document term vectors for cosine scoring.
//!
//! While building we only count; normalization to `count / document length`
//! happens once the collection is complete, producing the [`DocumentTable`]
//! that is persisted next to the block directory.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::DocId;

/// Raw term counts per document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentVectors {
    counts: BTreeMap<DocId, BTreeMap<String, u32>>,
}

impl DocumentVectors {
    pub fn add(&mut self, doc_id: DocId, term: &str, count: u32) {
        if count == 0 {
            return;
        }
        let terms = self.counts.entry(doc_id).or_default();
        match terms.get_mut(term) {
            Some(existing) => *existing += count,
            None => {
                terms.insert(term.to_string(), count);
            }
        }
    }

    pub fn count(&self, doc_id: DocId, term: &str) -> Option<u32> {
        self.counts.get(&doc_id)?.get(term).copied()
    }

    /// Number of term occurrences recorded for a document.
    pub fn length(&self, doc_id: DocId) -> u64 {
        self.counts
            .get(&doc_id)
            .map_or(0, |terms| terms.values().map(|&c| u64::from(c)).sum())
    }

    pub fn doc_count(&self) -> usize {
        self.counts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DocId, &BTreeMap<String, u32>)> {
        self.counts.iter().map(|(&doc, terms)| (doc, terms))
    }

    /// Normalize counts by document length. Documents absent from `files`
    /// get an empty file name.
    pub fn normalize(&self, files: &BTreeMap<DocId, String>) -> DocumentTable {
        let mut docs = BTreeMap::new();
        for (&doc_id, file) in files {
            docs.insert(
                doc_id,
                DocumentEntry {
                    file: file.clone(),
                    terms: BTreeMap::new(),
                },
            );
        }
        for (&doc_id, terms) in &self.counts {
            let length: u64 = terms.values().map(|&c| u64::from(c)).sum();
            let entry = docs.entry(doc_id).or_insert_with(|| DocumentEntry {
                file: String::new(),
                terms: BTreeMap::new(),
            });
            if length == 0 {
                continue;
            }
            entry.terms = terms
                .iter()
                .map(|(term, &count)| (term.clone(), count as f64 / length as f64))
                .collect();
        }
        DocumentTable { docs }
    }
}

/// One document's normalized term frequencies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentEntry {
    pub file: String,
    pub terms: BTreeMap<String, f64>,
}

/// Normalized term frequency per document, plus file names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentTable {
    pub docs: BTreeMap<DocId, DocumentEntry>,
}

impl DocumentTable {
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn file(&self, doc_id: DocId) -> Option<&str> {
        self.docs.get(&doc_id).map(|entry| entry.file.as_str())
    }

    /// Normalized frequency of `term` in `doc_id`.
    pub fn frequency(&self, doc_id: DocId, term: &str) -> Option<f64> {
        self.docs.get(&doc_id)?.terms.get(term).copied()
    }
}
