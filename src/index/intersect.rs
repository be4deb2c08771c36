// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Posting list intersection.
//!
//! Both lists iterate in ascending doc id, so a linear two-pointer merge finds
//! the shared documents: advance whichever side is behind, emit on equality.
//! The positional variant runs the same merge and then, per shared document,
//! slides a window over the second term's positions so every position pair
//! within distance `k` is found in one pass over each position list.

use std::cmp::Ordering;
use std::collections::VecDeque;

use serde::Serialize;

use super::postings::{Posting, PostingList};
use crate::types::{DocId, Position};

/// Documents present in both lists, ascending, each with both postings.
pub fn intersect_postings<'a>(
    left: &'a PostingList,
    right: &'a PostingList,
) -> Vec<(&'a Posting, &'a Posting)> {
    let mut out = Vec::with_capacity(left.docs_num().min(right.docs_num()));
    let mut a = left.postings().peekable();
    let mut b = right.postings().peekable();

    while let (Some(pa), Some(pb)) = (a.peek(), b.peek()) {
        match pa.doc_id.cmp(&pb.doc_id) {
            Ordering::Less => {
                a.next();
            }
            Ordering::Greater => {
                b.next();
            }
            Ordering::Equal => {
                out.push((*pa, *pb));
                a.next();
                b.next();
            }
        }
    }
    out
}

/// Ids of documents present in both lists, strictly ascending.
pub fn intersect(left: &PostingList, right: &PostingList) -> Vec<DocId> {
    intersect_postings(left, right)
        .into_iter()
        .map(|(posting, _)| posting.doc_id)
        .collect()
}

/// Ids of documents present in every list.
pub fn intersect_all(lists: &[&PostingList]) -> Vec<DocId> {
    let Some((first, rest)) = lists.split_first() else {
        return Vec::new();
    };
    let mut docs: Vec<DocId> = first.doc_ids().collect();
    for list in rest {
        docs.retain(|doc_id| list.docs.contains_key(doc_id));
        if docs.is_empty() {
            break;
        }
    }
    docs
}

/// A document where two terms occur within the window, with every qualifying
/// `(first term position, second term position)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionalMatch {
    pub doc_id: DocId,
    pub file: String,
    pub pairs: Vec<(Position, Position)>,
}

/// All `(p1, p2)` with `|p1 - p2| <= k`, in `p1`-major order.
pub fn position_pairs(first: &[Position], second: &[Position], k: u32) -> Vec<(Position, Position)> {
    let mut pairs = Vec::new();
    let mut window: VecDeque<Position> = VecDeque::new();
    let mut next = 0;

    for &p1 in first {
        while next < second.len() && second[next] <= p1.saturating_add(k) {
            window.push_back(second[next]);
            next += 1;
        }
        while window.front().is_some_and(|&p2| p2.saturating_add(k) < p1) {
            window.pop_front();
        }
        pairs.extend(window.iter().map(|&p2| (p1, p2)));
    }
    pairs
}

/// Documents where the two terms occur within `k` positions of each other.
pub fn positional_intersect(left: &PostingList, right: &PostingList, k: u32) -> Vec<PositionalMatch> {
    intersect_postings(left, right)
        .into_iter()
        .filter_map(|(a, b)| {
            let pairs = position_pairs(&a.positions, &b.positions, k);
            (!pairs.is_empty()).then(|| PositionalMatch {
                doc_id: a.doc_id,
                file: a.file.clone(),
                pairs,
            })
        })
        .collect()
}
