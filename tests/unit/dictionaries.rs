//! Term dictionaries built alongside the postings: k-grams, sound codes and
//! the fuzzy trie.

use super::common::{make_docs, LIBRARY};
use quarry::fuzzy::{EditModel, SparseAutomaton};
use quarry::{build_index, soundex, AutomatonTrie, KGramIndex};

#[test]
fn test_wildcard_over_collection() {
    let corpus = build_index(&make_docs(LIBRARY));
    assert_eq!(corpus.wildcard_search("fore*"), vec!["forecast", "forecasts"]);
    assert_eq!(corpus.wildcard_search("*ert"), vec!["robert", "rupert"]);
    assert_eq!(corpus.wildcard_search("th*e"), vec!["thane", "the"]);
    assert_eq!(corpus.wildcard_search("july"), vec!["july"]);
    assert!(corpus.wildcard_search("zz*").is_empty());
}

#[test]
fn test_kgram_pair_over_collection() {
    let corpus = build_index(&make_docs(LIBRARY));
    assert_eq!(corpus.kgram_terms_intersect("$fo", "st$"), vec!["forecast"]);
    assert_eq!(
        corpus.kgram_terms_intersect("$ro", ""),
        vec!["robert"]
    );
}

#[test]
fn test_phonetic_matches_share_code() {
    let corpus = build_index(&make_docs(LIBRARY));
    assert_eq!(corpus.phonetic_matches("Robert"), vec!["report", "robert", "rupert"]);
    for term in corpus.phonetic_matches("robert") {
        assert_eq!(soundex(&term).as_deref(), Some("R163"));
    }
}

#[test]
fn test_fuzzy_over_collection() {
    let corpus = build_index(&make_docs(LIBRARY));
    assert_eq!(corpus.fuzzy_search("hte", 1), vec!["the"]);
    assert_eq!(corpus.fuzzy_search("jly", 1), vec!["july"]);
    assert_eq!(corpus.fuzzy_search("hom", 1), vec!["home"]);
    assert_eq!(corpus.fuzzy_search("question", 0), vec!["question"]);
}

#[test]
fn test_edit_models_differ_only_on_swaps() {
    let mut trie = AutomatonTrie::new();
    for word in ["the", "then", "than", "tea"] {
        trie.insert(word);
    }
    assert_eq!(trie.fuzzy_search_with("hte", 1, EditModel::Levenshtein), Vec::<String>::new());
    assert_eq!(trie.fuzzy_search_with("hte", 1, EditModel::Transpositions), vec!["the"]);
    assert_eq!(trie.fuzzy_search("thn", 1), vec!["than", "the", "then"]);
}

#[test]
fn test_automaton_agrees_with_trie() {
    let words = ["forest", "forecast", "fist", "frost", "foist", "feast"];
    let mut trie = AutomatonTrie::new();
    for word in words {
        trie.insert(word);
    }
    let automaton = SparseAutomaton::new("forst", 1);
    let mut expected: Vec<&str> = words.iter().copied().filter(|w| automaton.matches(w)).collect();
    expected.sort_unstable();
    assert_eq!(trie.fuzzy_search("forst", 1), expected);
}

#[test]
fn test_kgram_index_short_terms() {
    let mut index = KGramIndex::new(3);
    for word in ["to", "go", "goto", "toggle"] {
        index.insert(word);
    }
    assert_eq!(index.wildcard_search("*o"), vec!["go", "goto", "to"]);
    assert_eq!(index.wildcard_search("to*"), vec!["to", "toggle"]);
}
