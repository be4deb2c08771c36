// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Vocabulary trie walked in lockstep with a [`SparseAutomaton`].
//!
//! Nodes live in one arena and refer to each other by index. The walk uses an
//! explicit stack of `(node, automaton state)` pairs, so deep vocabularies do
//! not grow the call stack, and a whole subtree is skipped the moment the
//! automaton state on its edge goes dead.

use std::collections::BTreeMap;

use super::automaton::{EditModel, SparseAutomaton, SparseVector};

type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Debug, Clone, Default)]
struct Node {
    children: BTreeMap<char, NodeId>,
    /// Set when a vocabulary term ends here.
    term: Option<Box<str>>,
}

#[derive(Debug, Clone)]
pub struct AutomatonTrie {
    nodes: Vec<Node>,
    terms: usize,
}

impl Default for AutomatonTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl AutomatonTrie {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            terms: 0,
        }
    }

    /// Add a term. Returns false if it was already present.
    pub fn insert(&mut self, term: &str) -> bool {
        let mut node = ROOT;
        for c in term.chars() {
            node = match self.nodes[node].children.get(&c) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[node].children.insert(c, child);
                    child
                }
            };
        }
        if self.nodes[node].term.is_some() {
            return false;
        }
        self.nodes[node].term = Some(term.into());
        self.terms += 1;
        true
    }

    pub fn contains(&self, term: &str) -> bool {
        let mut node = ROOT;
        for c in term.chars() {
            match self.nodes[node].children.get(&c) {
                Some(&child) => node = child,
                None => return false,
            }
        }
        self.nodes[node].term.is_some()
    }

    pub fn len(&self) -> usize {
        self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms == 0
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Every stored term within `max_edits` of `query`, in lexicographic order.
    /// An adjacent transposition counts as a single edit.
    pub fn fuzzy_search(&self, query: &str, max_edits: usize) -> Vec<String> {
        self.fuzzy_search_with(query, max_edits, EditModel::default())
    }

    pub fn fuzzy_search_with(&self, query: &str, max_edits: usize, model: EditModel) -> Vec<String> {
        let automaton = SparseAutomaton::with_model(query, max_edits, model);
        let mut matches = Vec::new();

        let mut stack: Vec<(NodeId, SparseVector)> = vec![(ROOT, automaton.start())];
        while let Some((node, state)) = stack.pop() {
            if let Some(term) = &self.nodes[node].term {
                if automaton.is_match(&state) {
                    matches.push(term.to_string());
                }
            }
            // Reversed so the smallest edge pops first: preorder is sorted order.
            for (&c, &child) in self.nodes[node].children.iter().rev() {
                let next = automaton.step(&state, c);
                if automaton.can_match(&next) {
                    stack.push((child, next));
                }
            }
        }
        matches
    }
}
