//! In-memory builds through `build_index` and the zone index.

use super::common::{assert_corpus_well_formed, files_of, make_docs, LIBRARY};
use quarry::{
    build_index, build_index_with, Analyzer, DocId, IndexConfig, Language, Lemmatizer,
    PostingsLookup, ZoneIndex, ZoneWeights,
};

#[test]
fn test_library_statistics() {
    let corpus = build_index(&make_docs(LIBRARY));
    assert_corpus_well_formed(&corpus);
    assert!(corpus.check_statistics().is_ok());
    assert_eq!(corpus.document_count(), LIBRARY.len());

    // "home" occurs twice in home_sales.txt and once in robert.txt.
    let home = corpus.posting_list("home").unwrap().unwrap();
    assert_eq!(home.docs_num(), 2);
    assert_eq!(home.total_frequency, 3);
    assert_eq!(home.get(DocId(1)).unwrap().positions, vec![2, 6]);
    assert!((home.idf - (5.0f64 / 3.0).ln()).abs() < 1e-12);
}

#[test]
fn test_reindexing_same_tokens_is_noop() {
    let docs = make_docs(&[("a.txt", "home sales")]);
    let corpus = build_index(&docs);
    let before = corpus.posting_list("home").unwrap();
    let tokens = quarry::testing::raw_tokens(0, "a.txt", "home sales");
    assert_eq!(corpus.index_tokens(&tokens), 0);
    let after = corpus.posting_list("home").unwrap();
    assert_eq!(
        after.map(|l| l.total_frequency),
        before.map(|l| l.total_frequency)
    );
}

#[test]
fn test_custom_kgram_size() {
    let config = IndexConfig {
        kgram_size: 2,
        ..IndexConfig::default()
    };
    let corpus = build_index_with(&make_docs(LIBRARY), &Analyzer::new(), &config);
    assert_eq!(corpus.kgram_size(), 2);
    assert_eq!(corpus.wildcard_search("ju*"), vec!["july"]);
}

#[test]
fn test_lemmatized_build_merges_forms() {
    let lemmas = Lemmatizer::from_pairs([("sales", "sale"), ("forecasts", "forecast")]);
    let analyzer = Analyzer::new().with_lemmatizer(Language::English, lemmas);
    let corpus = build_index_with(&make_docs(LIBRARY), &analyzer, &IndexConfig::default());

    assert!(corpus.posting_list("sales").unwrap().is_none());
    let forecast = corpus.posting_list("forecast").unwrap().unwrap();
    assert_eq!(forecast.doc_ids().collect::<Vec<_>>(), vec![DocId(1), DocId(4)]);
}

#[test]
fn test_zone_index_over_library() {
    let docs = make_docs(&[
        ("hamlet.txt", "the world of hamlet"),
        ("world_hamlet.txt", "hamlet in the world"),
        ("notes.txt", "nothing about him"),
    ]);
    let zones = ZoneIndex::build(
        &docs,
        &Analyzer::new(),
        &IndexConfig::default(),
        ZoneWeights::default(),
    )
    .unwrap();

    let ranked = zones.zone_score("world", "hamlet");
    assert_eq!(files_of(&ranked), vec!["world_hamlet.txt", "hamlet.txt"]);
    assert!((ranked[0].score - 1.0).abs() < 1e-12);
    assert!((ranked[1].score - 0.6).abs() < 1e-12);
    // Titles: "hamlet", "world hamlet", "notes".
    assert_eq!(zones.title().vocabulary(), vec!["hamlet", "notes", "world"]);
}
