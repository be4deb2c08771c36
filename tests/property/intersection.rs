//! Two-pointer and positional intersection against set-based oracles.

use std::collections::BTreeSet;

use proptest::prelude::*;
use quarry::index::position_pairs;
use quarry::{intersect, positional_intersect, Corpus, DocId};

use super::strategies::{collection, tokens_of};

fn corpus_of(collection: &[Vec<String>]) -> Corpus {
    let corpus = Corpus::new(3);
    corpus.index_tokens(&tokens_of(collection));
    corpus
}

fn docs_with(collection: &[Vec<String>], term: &str) -> BTreeSet<DocId> {
    collection
        .iter()
        .enumerate()
        .filter(|(_, words)| words.iter().any(|w| w == term))
        .map(|(doc, _)| DocId(doc as u32))
        .collect()
}

proptest! {
    #[test]
    fn prop_intersect_is_sorted_set_intersection(
        collection in collection(),
        t1 in "[a-e]{1,2}",
        t2 in "[a-e]{1,2}",
    ) {
        let corpus = corpus_of(&collection);
        let result = corpus.intersect(&t1, &t2);

        let expected: Vec<DocId> = docs_with(&collection, &t1)
            .intersection(&docs_with(&collection, &t2))
            .copied()
            .collect();
        prop_assert_eq!(&result, &expected);
        prop_assert!(result.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn prop_intersect_is_symmetric(collection in collection(), t1 in "[a-e]", t2 in "[a-e]") {
        let corpus = corpus_of(&collection);
        let postings = corpus.into_postings();
        if let (Some(a), Some(b)) = (postings.get(&t1), postings.get(&t2)) {
            prop_assert_eq!(intersect(a, b), intersect(b, a));
        }
    }

    #[test]
    fn prop_position_pairs_match_brute_force(
        first in prop::collection::btree_set(1u32..60, 0..15),
        second in prop::collection::btree_set(1u32..60, 0..15),
        k in 0u32..6,
    ) {
        let first: Vec<u32> = first.into_iter().collect();
        let second: Vec<u32> = second.into_iter().collect();

        let mut expected = Vec::new();
        for &p1 in &first {
            for &p2 in &second {
                if p1.abs_diff(p2) <= k {
                    expected.push((p1, p2));
                }
            }
        }
        prop_assert_eq!(position_pairs(&first, &second, k), expected);
    }

    #[test]
    fn prop_positional_matches_are_within_window(collection in collection(), k in 0u32..4) {
        let postings = corpus_of(&collection).into_postings();
        let (Some(a), Some(b)) = (postings.get("a"), postings.get("b")) else {
            return Ok(());
        };
        let plain: BTreeSet<DocId> = intersect(a, b).into_iter().collect();
        for matched in positional_intersect(a, b, k) {
            prop_assert!(plain.contains(&matched.doc_id));
            prop_assert!(!matched.pairs.is_empty());
            for (p1, p2) in matched.pairs {
                prop_assert!(p1.abs_diff(p2) <= k);
            }
        }
    }
}
