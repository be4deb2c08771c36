//! Shared generators.

use proptest::prelude::*;
use quarry::{DocId, Token};

/// Short words over a small alphabet, so collections share terms.
pub fn word() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-e]{1,5}").unwrap()
}

/// A document as a list of words.
pub fn document() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(word(), 1..12)
}

/// A collection of 1 to 6 documents.
pub fn collection() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(document(), 1..6)
}

/// Tokens of a collection, positions 1-based per document.
pub fn tokens_of(collection: &[Vec<String>]) -> Vec<Token> {
    collection
        .iter()
        .enumerate()
        .flat_map(|(doc, words)| {
            words.iter().enumerate().map(move |(i, word)| {
                Token::new(word.as_str(), i as u32 + 1, DocId(doc as u32), format!("{doc}.txt"))
            })
        })
        .collect()
}
