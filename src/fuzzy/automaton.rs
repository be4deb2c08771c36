// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Sparse Levenshtein automaton.
//!
//! The classic Levenshtein DP keeps one row of `len(target) + 1` costs per
//! consumed character. Almost all of those cells exceed the edit budget after
//! a few characters, so we keep only the live ones: `(index, cost)` pairs with
//! `cost <= max`, strictly increasing in `index`. The row never holds more
//! than `2 * max + 1` entries, and when it becomes empty no continuation of
//! the input can match.
//!
//! The automaton itself is stateless; callers thread the [`SparseVector`]
//! through [`SparseAutomaton::step`], which is what lets a trie walk share
//! prefixes between vocabulary terms.
//!
//! # Edit models
//!
//! [`EditModel::Levenshtein`] counts insertions, deletions and substitutions.
//! [`EditModel::Transpositions`] additionally counts swapping two adjacent
//! characters as one edit (optimal string alignment), so "hte" is one edit
//! from "the". Transpositions need the row from two steps back, which the
//! vector carries along with the last consumed character.

use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditModel {
    Levenshtein,
    #[default]
    Transpositions,
}

/// Live states after consuming a prefix: `(index into target, edit cost)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SparseVector {
    entries: Vec<(usize, usize)>,
    previous: Vec<(usize, usize)>,
    last: Option<char>,
}

impl SparseVector {
    #[inline]
    fn push(&mut self, index: usize, cost: usize) {
        debug_assert!(self.entries.last().is_none_or(|&(last, _)| last < index));
        self.entries.push((index, cost));
    }

    pub fn entries(&self) -> &[(usize, usize)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Smallest edit cost among live states.
    pub fn min_cost(&self) -> Option<usize> {
        self.entries.iter().map(|&(_, cost)| cost).min()
    }
}

fn cost_at(row: &[(usize, usize)], index: usize) -> Option<usize> {
    row.binary_search_by_key(&index, |&(i, _)| i)
        .ok()
        .map(|pos| row[pos].1)
}

#[derive(Debug, Clone)]
pub struct SparseAutomaton {
    target: Vec<char>,
    max_edits: usize,
    model: EditModel,
}

impl SparseAutomaton {
    /// Automaton with the default edit model (transpositions count as one edit).
    pub fn new(target: &str, max_edits: usize) -> Self {
        Self::with_model(target, max_edits, EditModel::default())
    }

    /// Plain Levenshtein automaton.
    pub fn levenshtein(target: &str, max_edits: usize) -> Self {
        Self::with_model(target, max_edits, EditModel::Levenshtein)
    }

    pub fn with_model(target: &str, max_edits: usize, model: EditModel) -> Self {
        Self {
            target: target.chars().collect(),
            max_edits,
            model,
        }
    }

    pub fn max_edits(&self) -> usize {
        self.max_edits
    }

    pub fn model(&self) -> EditModel {
        self.model
    }

    /// Row zero of the DP: reaching target index `i` costs `i` deletions.
    pub fn start(&self) -> SparseVector {
        let upper = self.max_edits.min(self.target.len());
        SparseVector {
            entries: (0..=upper).map(|i| (i, i)).collect(),
            previous: Vec::new(),
            last: None,
        }
    }

    /// Consume one input character.
    pub fn step(&self, state: &SparseVector, c: char) -> SparseVector {
        match self.model {
            EditModel::Levenshtein => self.step_levenshtein(state, c),
            EditModel::Transpositions => self.step_transpositions(state, c),
        }
    }

    fn step_levenshtein(&self, state: &SparseVector, c: char) -> SparseVector {
        let mut next = SparseVector::default();
        let entries = &state.entries;

        // Insertion before the first target character.
        if let Some(&(0, cost)) = entries.first() {
            if cost < self.max_edits {
                next.push(0, cost + 1);
            }
        }

        for (i, &(index, cost)) in entries.iter().enumerate() {
            if index == self.target.len() {
                break;
            }
            let substitution = usize::from(self.target[index] != c);
            let mut value = cost + substitution;

            // The entry just written for this same index.
            if let Some(&(last_index, last_cost)) = next.entries.last() {
                if last_index == index {
                    value = value.min(last_cost + 1);
                }
            }
            // The successor entry of the previous row.
            if let Some(&(succ_index, succ_cost)) = entries.get(i + 1) {
                if succ_index == index + 1 {
                    value = value.min(succ_cost + 1);
                }
            }

            if value <= self.max_edits {
                next.push(index + 1, value);
            }
        }
        next
    }

    fn step_transpositions(&self, state: &SparseVector, c: char) -> SparseVector {
        let len = self.target.len();
        let row = &state.entries;

        let mut candidates: BTreeSet<usize> = BTreeSet::new();
        for &(index, _) in row {
            candidates.insert(index);
            if index < len {
                candidates.insert(index + 1);
            }
        }
        if let Some(prev) = state.last {
            for &(k, _) in &state.previous {
                if k + 2 <= len && self.target[k] == c && self.target[k + 1] == prev {
                    candidates.insert(k + 2);
                }
            }
        }

        let mut next = SparseVector {
            entries: Vec::with_capacity(row.len() + 1),
            previous: row.clone(),
            last: Some(c),
        };

        while let Some(j) = candidates.pop_first() {
            let mut best = usize::MAX;
            if let Some(cost) = cost_at(row, j) {
                best = best.min(cost + 1);
            }
            if j > 0 {
                if let Some(cost) = cost_at(row, j - 1) {
                    best = best.min(cost + usize::from(self.target[j - 1] != c));
                }
                if let Some(&(last_index, last_cost)) = next.entries.last() {
                    if last_index == j - 1 {
                        best = best.min(last_cost + 1);
                    }
                }
            }
            if j >= 2 {
                if let Some(prev) = state.last {
                    if self.target[j - 1] == prev && self.target[j - 2] == c {
                        if let Some(cost) = cost_at(&state.previous, j - 2) {
                            best = best.min(cost + 1);
                        }
                    }
                }
            }

            if best <= self.max_edits {
                next.push(j, best);
                // Skipping the next target character may still be affordable.
                if j < len && best < self.max_edits {
                    candidates.insert(j + 1);
                }
            }
        }
        next
    }

    /// The consumed input is within `max_edits` of the whole target.
    pub fn is_match(&self, state: &SparseVector) -> bool {
        state
            .entries
            .last()
            .is_some_and(|&(index, _)| index == self.target.len())
    }

    /// Some continuation of the consumed input can still match.
    pub fn can_match(&self, state: &SparseVector) -> bool {
        !state.is_empty()
    }

    /// Characters worth feeding next: target characters at live positions
    /// (and one further along when transpositions are enabled), sorted.
    pub fn transitions(&self, state: &SparseVector) -> BTreeSet<char> {
        let lookahead = usize::from(self.model == EditModel::Transpositions);
        state
            .entries
            .iter()
            .flat_map(|&(index, _)| index..=index + lookahead)
            .filter_map(|index| self.target.get(index).copied())
            .collect()
    }

    /// Run the automaton over a whole word.
    pub fn matches(&self, word: &str) -> bool {
        let mut state = self.start();
        for c in word.chars() {
            state = self.step(&state, c);
            if !self.can_match(&state) {
                return false;
            }
        }
        self.is_match(&state)
    }
}
