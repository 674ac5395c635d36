//! Directory walking, extension filtering and per-file indexing.

use super::common::{sequential, write_corpus, CORPUS};
use crawldex::build::{location_of, text_files};
use crawldex::{build_index, Error, IndexRead, InvertedIndex};
use std::collections::BTreeSet;

#[test]
fn walk_picks_text_extensions_only() {
    let dir = tempfile::tempdir().unwrap();
    write_corpus(dir.path(), CORPUS);

    let names: BTreeSet<String> = text_files(dir.path())
        .unwrap()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();

    let expected: BTreeSet<String> = ["cats.txt", "dogs.txt", "owls.TEXT", "trees.txt", "empty.txt"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(names, expected);
}

#[test]
fn empty_documents_are_walked_but_not_counted() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_corpus(dir.path(), CORPUS);
    let index = sequential(dir.path());

    assert_eq!(index.location_count(), 4);
    let empty = location_of(&paths[5]);
    assert_eq!(index.term_count_of(&empty), 0);
    assert!(!index.counts().contains_key(&empty));
}

#[test]
fn positions_and_counts_for_a_real_file() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_corpus(dir.path(), CORPUS);
    let index = sequential(dir.path());
    let cats = location_of(&paths[0]);

    // the cat sat on the mat / cat chase mice
    assert_eq!(index.term_count_of(&cats), 9);
    assert_eq!(index.positions_of("cat", &cats), BTreeSet::from([2, 7]));
    assert_eq!(index.positions_of("the", &cats), BTreeSet::from([1, 5]));
    assert!(index.has_position("mice", &cats, 9));
}

#[test]
fn a_file_passed_directly_is_indexed_whatever_its_extension() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_corpus(dir.path(), CORPUS);
    let notes = &paths[4];

    let mut index = InvertedIndex::new();
    let stats = build_index(notes, &mut index).unwrap();

    assert_eq!(stats.indexed, 1);
    assert_eq!(index.locations_of("cat"), vec![location_of(notes)]);
    assert_eq!(index.position_count("cat", &location_of(notes)), 4);
}

#[test]
fn stemming_folds_inflections_into_one_term() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_corpus(dir.path(), CORPUS);
    let index = sequential(dir.path());
    let trees = location_of(&paths[3]);

    // running trees trees do not run
    assert_eq!(index.positions_of("run", &trees), BTreeSet::from([1, 6]));
    assert_eq!(index.positions_of("tree", &trees), BTreeSet::from([2, 3]));
}

#[test]
fn missing_root_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mut index = InvertedIndex::new();
    let err = build_index(&dir.path().join("absent"), &mut index).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    assert_eq!(index, InvertedIndex::new());
}
