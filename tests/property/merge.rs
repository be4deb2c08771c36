//! Bulk merge: splitting the token stream anywhere and merging the pieces
//! must give the same index as indexing it in one go.

use proptest::prelude::*;
use quarry::{Corpus, Token};

use super::common::assert_same_postings;
use super::strategies::{collection, tokens_of};

fn corpus_from(tokens: &[Token]) -> Corpus {
    let corpus = Corpus::new(3);
    corpus.index_tokens(tokens);
    corpus
}

fn assert_same_corpus(left: Corpus, right: Corpus) {
    assert_eq!(left.vocabulary(), right.vocabulary());
    assert_eq!(left.document_table(), right.document_table());
    let (left, right) = (left.into_postings(), right.into_postings());
    for (term, list) in &left {
        assert_same_postings(list, &right[term]);
    }
}

proptest! {
    #[test]
    fn prop_split_and_merge_equals_single_pass(
        collection in collection(),
        cut in 0usize..64,
    ) {
        let tokens = tokens_of(&collection);
        let cut = cut.min(tokens.len());

        let mut merged = corpus_from(&tokens[..cut]);
        merged.merge(corpus_from(&tokens[cut..]));
        prop_assert!(merged.check_well_formed().is_ok());

        assert_same_corpus(merged, corpus_from(&tokens));
    }

    #[test]
    fn prop_merge_is_associative(
        collection in collection(),
        a in 0usize..64,
        b in 0usize..64,
    ) {
        let tokens = tokens_of(&collection);
        let (a, b) = (a.min(tokens.len()), b.min(tokens.len()));
        let (i, j) = (a.min(b), a.max(b));
        let (x, y, z) = (&tokens[..i], &tokens[i..j], &tokens[j..]);

        // (x + y) + z
        let mut left = corpus_from(x);
        left.merge(corpus_from(y));
        left.merge(corpus_from(z));

        // x + (y + z)
        let mut tail = corpus_from(y);
        tail.merge(corpus_from(z));
        let mut right = corpus_from(x);
        right.merge(tail);

        assert_same_corpus(left, right);
    }

    #[test]
    fn prop_remerging_is_idempotent(collection in collection()) {
        let tokens = tokens_of(&collection);
        let mut twice = corpus_from(&tokens);
        twice.merge(corpus_from(&tokens));
        prop_assert!(twice.check_well_formed().is_ok());
        assert_same_corpus(twice, corpus_from(&tokens));
    }
}
