//! Term dictionaries rebuilt from the block tree vocabulary.

use super::common::{disk_index, make_docs, LIBRARY};
use quarry::{build_index, DiskIndex};

#[test]
fn test_wildcard_on_disk() {
    let (_dir, index) = disk_index(LIBRARY, 8, 4);
    assert_eq!(index.wildcard_search("fore*"), vec!["forecast", "forecasts"]);
    assert_eq!(index.wildcard_search("*ert"), vec!["robert", "rupert"]);
    assert_eq!(index.wildcard_search("r*t"), vec!["report", "robert", "rupert"]);
    assert!(index.wildcard_search("zz*").is_empty());
}

#[test]
fn test_dictionaries_agree_with_memory() {
    let (_dir, index) = disk_index(LIBRARY, 6, 5);
    let corpus = build_index(&make_docs(LIBRARY));

    for pattern in ["*e", "t*", "*o*", "h*e", "j*y", "the"] {
        assert_eq!(index.wildcard_search(pattern), corpus.wildcard_search(pattern), "{pattern}");
    }
    for query in ["hte", "hom", "rupret", "questoin"] {
        for max in 0..3 {
            assert_eq!(index.fuzzy_search(query, max), corpus.fuzzy_search(query, max), "{query}~{max}");
        }
    }
    for term in ["robert", "thane", "july", "wether"] {
        assert_eq!(index.phonetic_matches(term), corpus.phonetic_matches(term), "{term}");
    }
    assert_eq!(
        index.kgram_terms_intersect("$fo", "st$"),
        corpus.kgram_terms_intersect("$fo", "st$")
    );
}

#[test]
fn test_fuzzy_and_phonetic_on_disk() {
    let (_dir, index) = disk_index(LIBRARY, 8, 4);
    assert_eq!(index.fuzzy_search("hte", 1), vec!["the"]);
    assert_eq!(index.fuzzy_search("questoin", 2), vec!["question"]);
    assert_eq!(index.phonetic_matches("Robert"), vec!["report", "robert", "rupert"]);
}

#[test]
fn test_open_with_other_gram_size() {
    let (dir, _) = disk_index(LIBRARY, 8, 4);
    let index = DiskIndex::open_with_kgram_size(dir.path(), 2).unwrap();
    assert_eq!(index.wildcard_search("ju*"), vec!["july"]);
    assert_eq!(index.wildcard_search("*st"), vec!["forecast"]);
}
