// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Ranking.
//!
//! Three scorers, all returning [`ScoredDoc`]s best first:
//!
//! | Scorer                  | Input            | Needs                       |
//! |-------------------------|------------------|-----------------------------|
//! | [`ZoneIndex::zone_score`] | two terms      | title + body corpora        |
//! | [`rank_by_tfidf_overlap`] | two terms      | posting lists with idf      |
//! | [`rank_by_cosine`]        | analyzed query | posting lists + doc table   |
//!
//! Ordering is a stable sort on descending score, so ties keep ascending
//! doc id order and repeated calls agree.

mod cosine;
mod tfidf;
mod zones;

pub use cosine::{query_vector, rank_by_cosine, TermVector};
pub use tfidf::rank_by_tfidf_overlap;
pub use zones::ZoneIndex;

use crate::types::ScoredDoc;

/// Sort best first. Stable, so equal scores keep their incoming order.
pub fn sort_scores(scores: &mut [ScoredDoc]) {
    scores.sort_by(|a, b| b.score.total_cmp(&a.score));
}
