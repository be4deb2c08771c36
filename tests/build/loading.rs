//! Directory loading.

use std::fs;

use super::common::{input_dir, LIBRARY};
use quarry::build::list_files;
use quarry::{load_documents, DocId, Error};

#[test]
fn test_ids_follow_file_name_order() {
    let dir = input_dir(&[("c.txt", "three"), ("a.txt", "one"), ("b.txt", "two")]);
    let loaded = load_documents(dir.path()).unwrap();
    let ids: Vec<(DocId, &str)> = loaded.docs.iter().map(|d| (d.id, d.file.as_str())).collect();
    assert_eq!(
        ids,
        vec![(DocId(0), "a.txt"), (DocId(1), "b.txt"), (DocId(2), "c.txt")]
    );
    assert!(loaded.skipped.is_empty());
}

#[test]
fn test_subdirectories_are_not_documents() {
    let dir = input_dir(LIBRARY);
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("nested").join("inner.txt"), "ignored").unwrap();

    let files = list_files(dir.path()).unwrap();
    assert_eq!(files.len(), LIBRARY.len());
}

#[test]
fn test_unreadable_file_is_skipped_and_keeps_slot() {
    let dir = input_dir(&[("a.txt", "alpha"), ("c.txt", "gamma")]);
    fs::write(dir.path().join("b.bin"), [0xFF, 0xFE, 0x00, 0xC3]).unwrap();

    let loaded = load_documents(dir.path()).unwrap();
    assert_eq!(loaded.skipped.len(), 1);
    assert!(loaded.skipped[0].path.ends_with("b.bin"));

    let ids: Vec<DocId> = loaded.docs.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![DocId(0), DocId(2)]);
}

#[test]
fn test_missing_directory_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    assert!(matches!(
        load_documents(&missing),
        Err(Error::InputDirectory { .. })
    ));
}

#[test]
fn test_titles_come_from_file_stems() {
    let dir = input_dir(&[("home_sales.txt", "body")]);
    let loaded = load_documents(dir.path()).unwrap();
    assert_eq!(loaded.docs[0].title, "home_sales");
    assert_eq!(loaded.docs[0].lines, vec!["body"]);
}
