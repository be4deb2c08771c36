// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzzy term matching: typo tolerance via edit distance.
//!
//! The vocabulary lives in an [`AutomatonTrie`]; a query builds a
//! [`SparseAutomaton`] and the two are walked together, so shared prefixes are
//! stepped once and dead branches are never entered. The bounded DP functions
//! in `distance` answer the same question one pair at a time.

mod automaton;
mod distance;
mod trie;

pub use automaton::{EditModel, SparseAutomaton, SparseVector};
pub use distance::{levenshtein_within, osa_within};
pub use trie::AutomatonTrie;
