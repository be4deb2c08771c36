//! Cosine and tf-idf overlap ranking.

use super::common::{disk_index, files_of, make_docs, LIBRARY, SALES};
use quarry::{build_index, rank_by_cosine, Analyzer, OverlapFormula, ScoredDoc};

fn assert_same_ranking(left: &[ScoredDoc], right: &[ScoredDoc]) {
    assert_eq!(files_of(left), files_of(right));
    for (l, r) in left.iter().zip(right) {
        assert!((l.score - r.score).abs() < 1e-9, "{}: {} vs {}", l.file, l.score, r.score);
    }
}

#[test]
fn test_overlap_collection_frequency() {
    let (_dir, index) = disk_index(SALES, 4, 2);
    let ranked = index
        .rank_by_tfidf_overlap("home", "sales", OverlapFormula::CollectionFrequency)
        .unwrap();

    // home: 4 occurrences, idf ln 3 in a.txt and the floor in b.txt (3/3).
    // sales: 2 occurrences, idf ln 3 in both.
    let ln3 = 3f64.ln();
    assert_eq!(files_of(&ranked), vec!["a.txt", "b.txt"]);
    assert!((ranked[0].score - (4.0 * ln3 + 2.0 * ln3)).abs() < 1e-9);
    assert!((ranked[1].score - (4.0 * 0.001 + 2.0 * ln3)).abs() < 1e-9);
}

#[test]
fn test_overlap_term_frequency() {
    let (_dir, index) = disk_index(SALES, 4, 2);
    let ranked = index
        .rank_by_tfidf_overlap("home", "sales", OverlapFormula::TermFrequency)
        .unwrap();
    let ln3 = 3f64.ln();
    assert_eq!(files_of(&ranked), vec!["a.txt", "b.txt"]);
    assert!((ranked[0].score - 2.0 * ln3).abs() < 1e-9);
    assert!((ranked[1].score - (3.0 * 0.001 + ln3)).abs() < 1e-9);
}

#[test]
fn test_overlap_needs_both_terms() {
    let (_dir, index) = disk_index(SALES, 4, 2);
    let ranked = index
        .rank_by_tfidf_overlap("home", "weather", OverlapFormula::default())
        .unwrap();
    assert!(ranked.is_empty());
    let ranked = index
        .rank_by_tfidf_overlap("absent", "home", OverlapFormula::default())
        .unwrap();
    assert!(ranked.is_empty());
}

#[test]
fn test_cosine_prefers_denser_document() {
    let (_dir, index) = disk_index(SALES, 4, 2);
    let query = Analyzer::new().analyze_query("Home");
    let ranked = index.rank_by_cosine(&query, 10).unwrap();
    assert_eq!(files_of(&ranked), vec!["b.txt", "a.txt"]);
}

#[test]
fn test_cosine_top_k() {
    let (_dir, index) = disk_index(LIBRARY, 8, 4);
    let query = Analyzer::new().analyze_query("the july weather report");
    let all = index.rank_by_cosine(&query, 100).unwrap();
    let top = index.rank_by_cosine(&query, 2).unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top, all[..2].to_vec());
    assert_eq!(all[0].file, "weather.txt");
    assert!(all.windows(2).all(|w| w[0].score >= w[1].score));
    assert!(index.rank_by_cosine(&query, 0).unwrap().is_empty());
}

#[test]
fn test_disk_and_memory_rank_alike() {
    let (_dir, index) = disk_index(LIBRARY, 5, 3);
    let corpus = build_index(&make_docs(LIBRARY));
    let analyzer = Analyzer::new();

    for query in ["home sales", "to be or not to be", "the thane", "rain forecast july", "absent"] {
        let terms = analyzer.analyze_query(query);
        assert_same_ranking(
            &index.rank_by_cosine(&terms, 10).unwrap(),
            &rank_by_cosine(&corpus, &terms, 10).unwrap(),
        );
    }
    for (a, b) in [("home", "sales"), ("the", "july"), ("to", "be")] {
        for formula in [OverlapFormula::CollectionFrequency, OverlapFormula::TermFrequency] {
            assert_same_ranking(
                &index.rank_by_tfidf_overlap(a, b, formula).unwrap(),
                &quarry::rank_by_tfidf_overlap(&corpus, a, b, formula).unwrap(),
            );
        }
    }
}
