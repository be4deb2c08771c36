// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Vector space ranking.
//!
//! Each (term, document) pair and each query term becomes a three-component
//! vector `(normalized frequency, idf, normalized frequency × idf)`. For
//! every query term and every document in its posting list the document
//! accumulates `cos(query, document) × normalized frequency`; the top `k`
//! documents by total are returned.
//!
//! Query side: a term occurring `c` times in a query of `n` terms has
//! normalized frequency `c / n` and idf `ln(n / c)` (clamped like any idf).

use std::collections::BTreeMap;

use super::sort_scores;
use crate::error::Result;
use crate::index::{inverse_document_frequency, PostingsLookup};
use crate::types::{DocId, ScoredDoc};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TermVector {
    pub normalized_frequency: f64,
    pub idf: f64,
    pub tf_idf: f64,
}

impl TermVector {
    pub fn new(normalized_frequency: f64, idf: f64) -> Self {
        Self {
            normalized_frequency,
            idf,
            tf_idf: normalized_frequency * idf,
        }
    }

    pub fn dot(&self, other: &TermVector) -> f64 {
        self.tf_idf * other.tf_idf
            + self.idf * other.idf
            + self.normalized_frequency * other.normalized_frequency
    }

    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Cosine of the angle between the two vectors; 0 for a zero vector.
    pub fn cosine(&self, other: &TermVector) -> f64 {
        let denominator = self.norm() * other.norm();
        if denominator == 0.0 {
            0.0
        } else {
            self.dot(other) / denominator
        }
    }
}

/// One vector per distinct query term, in term order.
pub fn query_vector(terms: &[String]) -> Vec<(String, TermVector)> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for term in terms {
        *counts.entry(term.as_str()).or_default() += 1;
    }
    let len = terms.len();
    counts
        .into_iter()
        .map(|(term, count)| {
            let ndf = count as f64 / len as f64;
            let idf = inverse_document_frequency(len, count);
            (term.to_string(), TermVector::new(ndf, idf))
        })
        .collect()
}

/// Top `top_k` documents for an analyzed query, best first.
pub fn rank_by_cosine<L: PostingsLookup + ?Sized>(
    lookup: &L,
    terms: &[String],
    top_k: usize,
) -> Result<Vec<ScoredDoc>> {
    let mut accumulated: BTreeMap<DocId, (String, f64)> = BTreeMap::new();

    for (term, query) in query_vector(terms) {
        let Some(list) = lookup.posting_list(&term)? else {
            continue;
        };
        for posting in list.postings() {
            let Some(ndf) = lookup.normalized_frequency(posting.doc_id, &term) else {
                continue;
            };
            let document = TermVector::new(ndf, posting.idf);
            let entry = accumulated
                .entry(posting.doc_id)
                .or_insert_with(|| (posting.file.clone(), 0.0));
            entry.1 += query.cosine(&document) * ndf;
        }
    }

    let mut scores: Vec<ScoredDoc> = accumulated
        .into_iter()
        .map(|(doc_id, (file, score))| ScoredDoc {
            doc_id,
            file,
            score,
        })
        .collect();
    sort_scores(&mut scores);
    scores.truncate(top_k);
    Ok(scores)
}
