// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for wildcard lookups.
//!
//! Gram candidates plus the post-filter must return exactly the terms a
//! brute-force scan accepts, for any pattern and any vocabulary.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use quarry::kgram::matches_wildcard;
use quarry::KGramIndex;

#[derive(Debug, Arbitrary)]
struct WildcardInput {
    terms: Vec<String>,
    pattern: String,
    k: u8,
}

fuzz_target!(|input: WildcardInput| {
    let k = usize::from(input.k % 4) + 2;
    let pattern: String = input.pattern.chars().filter(|&c| c != '$').take(16).collect();

    let mut terms: Vec<String> = input
        .terms
        .into_iter()
        .take(64)
        .map(|t| t.chars().filter(|&c| c != '$' && c != '*').take(16).collect())
        .filter(|t: &String| !t.is_empty())
        .collect();
    terms.sort();
    terms.dedup();

    let mut index = KGramIndex::new(k);
    for term in &terms {
        index.insert(term);
    }

    let expected: Vec<String> = terms
        .iter()
        .filter(|t| matches_wildcard(t, &pattern))
        .cloned()
        .collect();
    assert_eq!(index.wildcard_search(&pattern), expected);
});
