// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! K-gram dictionary for wildcard queries.
//!
//! Every term is registered under its boundary-marked k-grams: `$` + the first
//! `k-1` characters, every sliding window of `k` characters, and the last
//! `k-1` characters + `$`. A wildcard such as `fo*st` becomes the grams `$fo`
//! and `st$`; intersecting their term sets gives candidates, and a structural
//! post-filter removes terms that merely share grams with the pattern in the
//! wrong places.
//!
//! Terms shorter than `k` get a single `$term` gram. They are also kept in a
//! side set and always offered to the post-filter, since a suffix-anchored
//! pattern would never find them through their grams.

use std::collections::{BTreeMap, BTreeSet};

/// Word boundary marker. Never part of a term (the tokenizer strips it).
pub const BOUNDARY: char = '$';

/// Wildcard placeholder in query patterns.
pub const WILDCARD: char = '*';

/// Boundary-marked k-grams of `term`, in order, without duplicates.
pub fn split_kgrams(term: &str, k: usize) -> Vec<String> {
    let chars: Vec<char> = term.chars().collect();
    if k == 0 || chars.is_empty() {
        return Vec::new();
    }
    if chars.len() < k {
        return vec![format!("{BOUNDARY}{term}")];
    }

    let mut grams: Vec<String> = Vec::with_capacity(chars.len() + 2);
    let mut push = |gram: String| {
        if !grams.contains(&gram) {
            grams.push(gram);
        }
    };

    push(std::iter::once(BOUNDARY).chain(chars[..k - 1].iter().copied()).collect());
    for window in chars.windows(k) {
        push(window.iter().collect());
    }
    push(chars[chars.len() - (k - 1)..].iter().copied().chain(std::iter::once(BOUNDARY)).collect());
    grams
}

/// Every `k`-character window of `s` (nothing when `s` is shorter).
fn windows(s: &str, k: usize) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    if k == 0 || chars.len() < k {
        return Vec::new();
    }
    chars.windows(k).map(|w| w.iter().collect()).collect()
}

/// Does `term` satisfy a `*` pattern?
///
/// The piece before the first `*` is a prefix, the piece after the last `*` a
/// suffix, and the pieces in between must occur in order, without overlapping
/// each other or the ends. A pattern without `*` is an exact match.
pub fn matches_wildcard(term: &str, pattern: &str) -> bool {
    let pieces: Vec<&str> = pattern.split(WILDCARD).collect();
    let (first, last) = match pieces.as_slice() {
        [only] => return term == *only,
        [first, .., last] => (*first, *last),
        [] => return false,
    };

    if term.len() < first.len() + last.len() || !term.starts_with(first) || !term.ends_with(last)
    {
        return false;
    }

    let mut rest = &term[first.len()..term.len() - last.len()];
    for piece in &pieces[1..pieces.len() - 1] {
        match rest.find(piece) {
            Some(at) => rest = &rest[at + piece.len()..],
            None => return false,
        }
    }
    true
}

/// Structural check for one side of a two-gram query.
fn gram_admits(term: &str, gram: &str) -> bool {
    let bare: String = gram.chars().filter(|&c| c != BOUNDARY).collect();
    if gram.starts_with(BOUNDARY) && gram.ends_with(BOUNDARY) && gram.len() > 1 {
        term == bare
    } else if gram.starts_with(BOUNDARY) {
        term.starts_with(&bare)
    } else if gram.ends_with(BOUNDARY) {
        term.ends_with(&bare)
    } else {
        term.contains(&bare)
    }
}

#[derive(Debug, Clone)]
pub struct KGramIndex {
    k: usize,
    grams: BTreeMap<String, BTreeSet<String>>,
    vocabulary: BTreeSet<String>,
    short_terms: BTreeSet<String>,
}

impl KGramIndex {
    pub fn new(k: usize) -> Self {
        Self {
            k: k.max(1),
            grams: BTreeMap::new(),
            vocabulary: BTreeSet::new(),
            short_terms: BTreeSet::new(),
        }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Register a term under each of its grams. Re-inserting is a no-op.
    pub fn insert(&mut self, term: &str) -> bool {
        if term.is_empty() || !self.vocabulary.insert(term.to_string()) {
            return false;
        }
        if term.chars().count() < self.k {
            self.short_terms.insert(term.to_string());
        }
        for gram in split_kgrams(term, self.k) {
            self.grams.entry(gram).or_default().insert(term.to_string());
        }
        true
    }

    pub fn terms_for(&self, gram: &str) -> Option<&BTreeSet<String>> {
        self.grams.get(gram)
    }

    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    pub fn gram_count(&self) -> usize {
        self.grams.len()
    }

    /// Terms registered under both grams that also satisfy both structurally.
    ///
    /// When one gram is empty the other gram's whole term set is returned.
    pub fn kgram_terms_intersect(&self, gram1: &str, gram2: &str) -> Vec<String> {
        let set = |gram: &str| self.grams.get(gram).into_iter().flatten().cloned();
        if gram1.is_empty() {
            return set(gram2).collect();
        }
        if gram2.is_empty() {
            return set(gram1).collect();
        }

        let (Some(terms1), Some(terms2)) = (self.grams.get(gram1), self.grams.get(gram2)) else {
            return Vec::new();
        };
        terms1
            .intersection(terms2)
            .filter(|term| gram_admits(term, gram1) && gram_admits(term, gram2))
            .cloned()
            .collect()
    }

    /// Grams a `*` pattern implies, by piece.
    fn pattern_grams(&self, pattern: &str) -> Vec<String> {
        let pieces: Vec<&str> = pattern.split(WILDCARD).collect();
        let last = pieces.len() - 1;
        let mut grams = Vec::new();
        for (i, piece) in pieces.iter().enumerate() {
            let mut marked = String::with_capacity(piece.len() + 2);
            if i == 0 {
                marked.push(BOUNDARY);
            }
            marked.push_str(piece);
            if i == last {
                marked.push(BOUNDARY);
            }
            grams.extend(windows(&marked, self.k));
        }
        grams.sort();
        grams.dedup();
        grams
    }

    /// Vocabulary terms matching a `*` pattern, sorted.
    pub fn wildcard_search(&self, pattern: &str) -> Vec<String> {
        if !pattern.contains(WILDCARD) {
            return self.vocabulary.get(pattern).cloned().into_iter().collect();
        }

        let grams = self.pattern_grams(pattern);
        let mut candidates: BTreeSet<&String> = if grams.is_empty() {
            self.vocabulary.iter().collect()
        } else {
            let mut sets: Vec<&BTreeSet<String>> = Vec::with_capacity(grams.len());
            for gram in &grams {
                match self.grams.get(gram) {
                    Some(terms) => sets.push(terms),
                    None => {
                        sets.clear();
                        break;
                    }
                }
            }
            // Start from the rarest gram.
            sets.sort_by_key(|terms| terms.len());
            match sets.split_first() {
                Some((smallest, others)) => smallest
                    .iter()
                    .filter(|term| others.iter().all(|set| set.contains(*term)))
                    .collect(),
                None => BTreeSet::new(),
            }
        };
        candidates.extend(self.short_terms.iter());

        candidates
            .into_iter()
            .filter(|term| matches_wildcard(term, pattern))
            .cloned()
            .collect()
    }
}
