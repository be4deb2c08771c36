// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index construction.
//!
//! Two entry points:
//!
//! - [`build_index`] builds a [`Corpus`] in memory. Good for small
//!   collections and tests.
//! - [`spimi`] / [`SpimiBuilder`] stream a directory through bounded
//!   temporary blocks and persist fixed-size final blocks plus a block tree.
//!
//! Both run the same phases with a hard join between them: tokenize every
//! document (rayon, one task per document), then index every token (rayon,
//! one task per token).

mod loader;
mod spimi;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::info;

pub use loader::{
    display_name, list_files, load_documents, load_documents_with_progress, LoadedDocuments,
    SkippedFile,
};
pub use spimi::{spimi, BuildReport, SpimiBuilder};

use crate::config::IndexConfig;
use crate::index::Corpus;
use crate::text::Analyzer;
use crate::types::{Document, Token};

pub(crate) fn progress_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("━━╸")
}

/// Body tokens of one document, positions 1-based.
pub fn document_tokens(analyzer: &Analyzer, doc: &Document) -> Vec<Token> {
    analyzer
        .analyze_document(doc)
        .body
        .into_iter()
        .map(|(term, position)| Token::new(term, position, doc.id, doc.file.clone()))
        .collect()
}

/// Title-zone tokens of one document.
pub fn title_tokens(analyzer: &Analyzer, doc: &Document) -> Vec<Token> {
    analyzer
        .analyze_document(doc)
        .title
        .into_iter()
        .map(|(term, position)| Token::new(term, position, doc.id, doc.file.clone()))
        .collect()
}

/// Tokenize all documents in parallel; tokens come back in document order.
pub fn tokenize_documents(analyzer: &Analyzer, docs: &[Document], progress: &ProgressBar) -> Vec<Token> {
    progress.set_length(docs.len() as u64);
    let per_doc: Vec<Vec<Token>> = docs
        .par_iter()
        .map(|doc| {
            let tokens = document_tokens(analyzer, doc);
            progress.inc(1);
            tokens
        })
        .collect();
    per_doc.into_iter().flatten().collect()
}

/// Build an in-memory index with the default analyzer and configuration.
pub fn build_index(docs: &[Document]) -> Corpus {
    build_index_with(docs, &Analyzer::new(), &IndexConfig::default())
}

pub fn build_index_with(docs: &[Document], analyzer: &Analyzer, config: &IndexConfig) -> Corpus {
    let mut corpus = Corpus::new(config.kgram_size);
    for doc in docs {
        corpus.register_document(doc.id, &doc.file);
    }

    let tokens = tokenize_documents(analyzer, docs, &ProgressBar::hidden());
    let recorded = corpus.index_tokens(&tokens);
    corpus.compute_statistics();

    info!(
        documents = docs.len(),
        tokens = tokens.len(),
        recorded,
        terms = corpus.term_count(),
        "built in-memory index"
    );
    corpus
}
