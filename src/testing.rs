// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.

#![doc(hidden)]

use std::fs;
use std::path::Path;

use crate::index::Corpus;
use crate::types::{DocId, Document, Token};

/// Whitespace tokens of `text`, positions 1-based, no analysis.
pub fn raw_tokens(doc: u32, file: &str, text: &str) -> Vec<Token> {
    text.split_whitespace()
        .enumerate()
        .map(|(i, term)| Token::new(term, i as u32 + 1, DocId(doc), file))
        .collect()
}

/// Documents numbered in the order given.
pub fn make_docs(files: &[(&str, &str)]) -> Vec<Document> {
    files
        .iter()
        .enumerate()
        .map(|(i, (file, text))| Document::new(DocId(i as u32), *file, text))
        .collect()
}

/// A corpus indexed from raw whitespace tokens, with statistics computed.
pub fn raw_corpus(files: &[(&str, &str)]) -> Corpus {
    let mut corpus = Corpus::new(3);
    for (i, (file, text)) in files.iter().enumerate() {
        corpus.register_document(DocId(i as u32), file);
        corpus.index_tokens(&raw_tokens(i as u32, file, text));
    }
    corpus.compute_statistics();
    corpus
}

/// Write each `(file, text)` pair into `dir`.
pub fn write_files(dir: &Path, files: &[(&str, &str)]) {
    for (file, text) in files {
        fs::write(dir.join(file), text).expect("write test file");
    }
}

/// The three-document collection used throughout the query tests.
pub const SALES: &[(&str, &str)] = &[
    ("a.txt", "home sales rise in july"),
    ("b.txt", "home home home sales"),
    ("c.txt", "weather report for july"),
];
