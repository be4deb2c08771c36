// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Weighted zone scoring over a title zone and a body zone.

use rayon::prelude::*;

use super::sort_scores;
use crate::build::{document_tokens, title_tokens};
use crate::config::{IndexConfig, ZoneWeights};
use crate::error::Result;
use crate::index::Corpus;
use crate::text::Analyzer;
use crate::types::{Document, ScoredDoc, Token};

#[derive(Debug)]
pub struct ZoneIndex {
    title: Corpus,
    body: Corpus,
    weights: ZoneWeights,
}

impl ZoneIndex {
    /// Tokenize titles and bodies, then build both corpora side by side.
    pub fn build(
        documents: &[Document],
        analyzer: &Analyzer,
        index: &IndexConfig,
        weights: ZoneWeights,
    ) -> Result<Self> {
        let (bodies, titles): (Vec<Vec<Token>>, Vec<Vec<Token>>) = documents
            .par_iter()
            .map(|doc| (document_tokens(analyzer, doc), title_tokens(analyzer, doc)))
            .unzip();
        let bodies: Vec<Token> = bodies.into_iter().flatten().collect();
        let titles: Vec<Token> = titles.into_iter().flatten().collect();
        Self::from_tokens(&bodies, &titles, index.kgram_size, weights)
    }

    pub fn from_tokens(
        body_tokens: &[Token],
        title_tokens: &[Token],
        kgram_size: usize,
        weights: ZoneWeights,
    ) -> Result<Self> {
        weights.validate()?;
        let (body, title) = rayon::join(
            || {
                let corpus = Corpus::new(kgram_size);
                corpus.index_tokens(body_tokens);
                corpus
            },
            || {
                let corpus = Corpus::new(kgram_size);
                corpus.index_tokens(title_tokens);
                corpus
            },
        );
        Ok(Self {
            title,
            body,
            weights,
        })
    }

    pub fn title(&self) -> &Corpus {
        &self.title
    }

    pub fn body(&self) -> &Corpus {
        &self.body
    }

    /// Documents whose body holds both terms, weighted by the zones that hold
    /// both terms, best first.
    pub fn zone_score(&self, term1: &str, term2: &str) -> Vec<ScoredDoc> {
        let in_title = self.title.intersect(term1, term2);
        let files = self.body.documents();

        let mut scores: Vec<ScoredDoc> = self
            .body
            .intersect(term1, term2)
            .into_iter()
            .map(|doc_id| {
                let mut score = self.weights.body;
                if in_title.binary_search(&doc_id).is_ok() {
                    score += self.weights.title;
                }
                ScoredDoc {
                    doc_id,
                    file: files.get(&doc_id).cloned().unwrap_or_default(),
                    score,
                }
            })
            .collect();
        sort_scores(&mut scores);
        scores
    }
}
