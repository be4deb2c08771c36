// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bounded edit distance by dynamic programming.
//!
//! The automaton and the trie walk are checked against these. Both models
//! share one DP over `char`s; the length difference is a lower bound on the
//! distance, so far-apart lengths never reach the table.

/// Within `max` insertions, deletions or substitutions?
pub fn levenshtein_within(a: &str, b: &str, max: usize) -> bool {
    within(a, b, max, false)
}

/// Like [`levenshtein_within`], but swapping two adjacent characters is a
/// single edit (optimal string alignment distance).
pub fn osa_within(a: &str, b: &str, max: usize) -> bool {
    within(a, b, max, true)
}

fn within(a: &str, b: &str, max: usize, transpositions: bool) -> bool {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.len().abs_diff(b.len()) > max {
        return false;
    }

    // Rows i-2, i-1 and i.
    let mut before = vec![0usize; b.len() + 1];
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut cur = vec![0usize; b.len() + 1];

    for i in 1..=a.len() {
        cur[0] = i;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let mut value = (prev[j] + 1).min(cur[j - 1] + 1).min(prev[j - 1] + cost);
            if transpositions && i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                value = value.min(before[j - 2] + 1);
            }
            cur[j] = value;
        }
        // OSA can dip below a row minimum one row later, so only the plain
        // model may stop early.
        if !transpositions && cur.iter().min().is_some_and(|&m| m > max) {
            return false;
        }
        std::mem::swap(&mut before, &mut prev);
        std::mem::swap(&mut prev, &mut cur);
    }

    prev[b.len()] <= max
}
