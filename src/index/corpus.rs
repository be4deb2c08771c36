// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The in-memory postings store.
//!
//! A `Corpus` owns the term → posting list map and the four side dictionaries
//! (k-grams, sound codes, fuzzy trie, per-document term counts). Each sits
//! behind its own `RwLock` so rayon workers can index tokens concurrently.
//!
//! Lock discipline: every method takes at most one lock at a time and drops it
//! before taking the next. No two locks are ever held together, so there is no
//! ordering to get wrong.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;
use rayon::prelude::*;

use super::intersect::{self, PositionalMatch};
use super::invariants::{check_postings, InvariantError};
use super::postings::{PostingList, Recorded};
use super::vectors::{DocumentTable, DocumentVectors};
use super::PostingsLookup;
use crate::error::Result;
use crate::fuzzy::AutomatonTrie;
use crate::kgram::KGramIndex;
use crate::phonetic::PhoneticIndex;
use crate::types::{DocId, Token};

#[derive(Debug)]
pub struct Corpus {
    kgram_size: usize,
    postings: RwLock<BTreeMap<String, PostingList>>,
    kgrams: RwLock<KGramIndex>,
    phonetic: RwLock<PhoneticIndex>,
    trie: RwLock<AutomatonTrie>,
    vectors: RwLock<DocumentVectors>,
    documents: RwLock<BTreeMap<DocId, String>>,
}

impl Default for Corpus {
    fn default() -> Self {
        Self::new(crate::config::IndexConfig::default().kgram_size)
    }
}

impl Corpus {
    pub fn new(kgram_size: usize) -> Self {
        Self {
            kgram_size,
            postings: RwLock::new(BTreeMap::new()),
            kgrams: RwLock::new(KGramIndex::new(kgram_size)),
            phonetic: RwLock::new(PhoneticIndex::new()),
            trie: RwLock::new(AutomatonTrie::new()),
            vectors: RwLock::new(DocumentVectors::default()),
            documents: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn kgram_size(&self) -> usize {
        self.kgram_size
    }

    /// Make a document part of the collection even if it yields no terms.
    pub fn register_document(&self, doc_id: DocId, file: &str) {
        self.documents
            .write()
            .entry(doc_id)
            .or_insert_with(|| file.to_string());
    }

    /// Single-token insertion. Safe to call from many threads at once.
    pub fn index_token(&self, token: &Token) -> Recorded {
        if token.term.is_empty() {
            return Recorded::Duplicate;
        }
        self.register_document(token.doc_id, &token.file);

        let (outcome, new_term) = {
            let mut postings = self.postings.write();
            match postings.get_mut(&token.term) {
                Some(list) => (list.record(token.doc_id, &token.file, token.position), false),
                None => {
                    let mut list = PostingList::default();
                    let outcome = list.record(token.doc_id, &token.file, token.position);
                    postings.insert(token.term.clone(), list);
                    (outcome, true)
                }
            }
        };

        if outcome.is_new() {
            self.vectors.write().add(token.doc_id, &token.term, 1);
        }
        // Only the worker that created the posting list registers the term.
        if new_term {
            self.register_term(&token.term);
        }
        outcome
    }

    /// Index a batch of tokens on the rayon pool. Returns the number of
    /// tokens that changed the index.
    pub fn index_tokens(&self, tokens: &[Token]) -> usize {
        let recorded = AtomicUsize::new(0);
        tokens.par_iter().for_each(|token| {
            if self.index_token(token).is_new() {
                recorded.fetch_add(1, Ordering::Relaxed);
            }
        });
        recorded.into_inner()
    }

    fn register_term(&self, term: &str) {
        self.kgrams.write().insert(term);
        self.phonetic.write().insert(term);
        self.trie.write().insert(term);
    }

    /// Fold a block of posting lists in with the bulk merge rule.
    pub fn merge_postings(&mut self, incoming: BTreeMap<String, PostingList>) {
        let postings = self.postings.get_mut();
        let vectors = self.vectors.get_mut();
        let documents = self.documents.get_mut();
        let mut new_terms = Vec::new();

        for (term, list) in incoming {
            if term.is_empty() {
                continue;
            }
            for posting in list.postings() {
                documents
                    .entry(posting.doc_id)
                    .or_insert_with(|| posting.file.clone());
            }
            match postings.get_mut(&term) {
                Some(existing) => {
                    for (doc_id, added) in existing.merge(list) {
                        vectors.add(doc_id, &term, added);
                    }
                }
                None => {
                    for posting in list.postings() {
                        vectors.add(posting.doc_id, &term, posting.frequency);
                    }
                    postings.insert(term.clone(), list);
                    new_terms.push(term);
                }
            }
        }

        let kgrams = self.kgrams.get_mut();
        let phonetic = self.phonetic.get_mut();
        let trie = self.trie.get_mut();
        for term in &new_terms {
            kgrams.insert(term);
            phonetic.insert(term);
            trie.insert(term);
        }
    }

    /// Fold another corpus into this one.
    pub fn merge(&mut self, other: Corpus) {
        let Corpus {
            postings,
            documents,
            ..
        } = other;
        let documents = documents.into_inner();
        {
            let mine = self.documents.get_mut();
            for (doc_id, file) in documents {
                mine.entry(doc_id).or_insert(file);
            }
        }
        self.merge_postings(postings.into_inner());
    }

    /// Assign idf to every posting list against the registered documents.
    pub fn compute_statistics(&mut self) {
        let docs = self.documents.get_mut().len();
        self.postings
            .get_mut()
            .values_mut()
            .for_each(|list| list.assign_idf(docs));
    }

    pub fn check_well_formed(&self) -> std::result::Result<(), InvariantError> {
        check_postings(&self.postings.read(), false)
    }

    /// Like [`Corpus::check_well_formed`], also requiring positive idf.
    pub fn check_statistics(&self) -> std::result::Result<(), InvariantError> {
        check_postings(&self.postings.read(), true)
    }

    pub fn term_count(&self) -> usize {
        self.postings.read().len()
    }

    pub fn vocabulary(&self) -> Vec<String> {
        self.postings.read().keys().cloned().collect()
    }

    pub fn documents(&self) -> BTreeMap<DocId, String> {
        self.documents.read().clone()
    }

    pub fn document_table(&self) -> DocumentTable {
        let documents = self.documents.read().clone();
        self.vectors.read().normalize(&documents)
    }

    pub fn into_postings(self) -> BTreeMap<String, PostingList> {
        self.postings.into_inner()
    }

    /// Consume the corpus, yielding its posting lists and document table.
    pub fn into_parts(self) -> (BTreeMap<String, PostingList>, DocumentTable) {
        let table = self.document_table();
        (self.postings.into_inner(), table)
    }

    pub fn wildcard_search(&self, pattern: &str) -> Vec<String> {
        self.kgrams.read().wildcard_search(pattern)
    }

    pub fn kgram_terms_intersect(&self, gram1: &str, gram2: &str) -> Vec<String> {
        self.kgrams.read().kgram_terms_intersect(gram1, gram2)
    }

    pub fn fuzzy_search(&self, query: &str, max_edits: usize) -> Vec<String> {
        self.trie.read().fuzzy_search(query, max_edits)
    }

    pub fn phonetic_matches(&self, term: &str) -> Vec<String> {
        self.phonetic.read().matches(term)
    }

    pub fn intersect(&self, term1: &str, term2: &str) -> Vec<DocId> {
        let postings = self.postings.read();
        match (postings.get(term1), postings.get(term2)) {
            (Some(a), Some(b)) => intersect::intersect(a, b),
            _ => Vec::new(),
        }
    }

    pub fn positional_intersect(&self, term1: &str, term2: &str, k: u32) -> Vec<PositionalMatch> {
        let postings = self.postings.read();
        match (postings.get(term1), postings.get(term2)) {
            (Some(a), Some(b)) => intersect::positional_intersect(a, b, k),
            _ => Vec::new(),
        }
    }
}

impl PostingsLookup for Corpus {
    fn posting_list(&self, term: &str) -> Result<Option<PostingList>> {
        Ok(self.postings.read().get(term).cloned())
    }

    fn document_count(&self) -> usize {
        self.documents.read().len()
    }

    fn file(&self, doc_id: DocId) -> Option<String> {
        self.documents.read().get(&doc_id).cloned()
    }

    fn normalized_frequency(&self, doc_id: DocId, term: &str) -> Option<f64> {
        let vectors = self.vectors.read();
        let count = vectors.count(doc_id, term)?;
        let length = vectors.length(doc_id);
        (length > 0).then(|| f64::from(count) / length as f64)
    }
}
