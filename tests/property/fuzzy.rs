//! The sparse automaton and the trie walk against the dynamic-programming
//! edit distance.

use proptest::prelude::*;
use quarry::fuzzy::{levenshtein_within, osa_within, EditModel, SparseAutomaton};
use quarry::AutomatonTrie;

fn short_word() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-d]{0,6}").unwrap()
}

proptest! {
    #[test]
    fn prop_levenshtein_automaton_matches_oracle(
        target in short_word(),
        word in short_word(),
        max in 0usize..4,
    ) {
        let automaton = SparseAutomaton::levenshtein(&target, max);
        prop_assert_eq!(automaton.matches(&word), levenshtein_within(&target, &word, max));
    }

    #[test]
    fn prop_transposition_automaton_matches_oracle(
        target in short_word(),
        word in short_word(),
        max in 0usize..4,
    ) {
        let automaton = SparseAutomaton::new(&target, max);
        prop_assert_eq!(automaton.matches(&word), osa_within(&target, &word, max));
    }

    #[test]
    fn prop_sparse_vectors_stay_bounded(
        target in short_word(),
        word in short_word(),
        max in 0usize..3,
    ) {
        let automaton = SparseAutomaton::levenshtein(&target, max);
        let mut state = automaton.start();
        for c in word.chars() {
            prop_assert!(state.len() <= 2 * max + 1);
            state = automaton.step(&state, c);
        }
        prop_assert!(state.len() <= 2 * max + 1);
    }

    #[test]
    fn prop_trie_search_matches_linear_scan(
        words in prop::collection::btree_set("[a-d]{1,6}", 0..25),
        query in short_word(),
        max in 0usize..3,
        swaps in any::<bool>(),
    ) {
        let mut trie = AutomatonTrie::new();
        for word in &words {
            trie.insert(word);
        }
        let (model, oracle): (EditModel, fn(&str, &str, usize) -> bool) = if swaps {
            (EditModel::Transpositions, osa_within)
        } else {
            (EditModel::Levenshtein, levenshtein_within)
        };

        let expected: Vec<String> = words
            .iter()
            .filter(|w| oracle(&query, w, max))
            .cloned()
            .collect();
        prop_assert_eq!(trie.fuzzy_search_with(&query, max, model), expected);
    }
}
