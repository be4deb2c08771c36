// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Two-term overlap score.
//!
//! For every document holding both terms, sum one weight per term:
//!
//! - `CollectionFrequency`: the term's total frequency in the collection
//!   times the document's idf for that term. Not textbook tf-idf (the
//!   frequency is collection-wide), kept because indexes built elsewhere are
//!   ranked this way.
//! - `TermFrequency`: the term's frequency in that document times the
//!   document's idf for it.

use super::sort_scores;
use crate::config::OverlapFormula;
use crate::error::Result;
use crate::index::{intersect_postings, Posting, PostingList, PostingsLookup};
use crate::types::ScoredDoc;

fn weight(list: &PostingList, posting: &Posting, formula: OverlapFormula) -> f64 {
    match formula {
        OverlapFormula::CollectionFrequency => list.total_frequency as f64 * posting.idf,
        OverlapFormula::TermFrequency => f64::from(posting.frequency) * posting.idf,
    }
}

pub fn rank_by_tfidf_overlap<L: PostingsLookup + ?Sized>(
    lookup: &L,
    term1: &str,
    term2: &str,
    formula: OverlapFormula,
) -> Result<Vec<ScoredDoc>> {
    let (Some(p1), Some(p2)) = (lookup.posting_list(term1)?, lookup.posting_list(term2)?) else {
        return Ok(Vec::new());
    };

    let mut scores: Vec<ScoredDoc> = intersect_postings(&p1, &p2)
        .into_iter()
        .map(|(d1, d2)| ScoredDoc {
            doc_id: d1.doc_id,
            file: d1.file.clone(),
            score: weight(&p1, d1, formula) + weight(&p2, d2, formula),
        })
        .collect();
    sort_scores(&mut scores);
    Ok(scores)
}
