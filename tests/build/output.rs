//! JSON rendering of the index and counts.

use super::common::{concurrent, sequential, write_corpus};
use crawldex::build::location_of;
use crawldex::json::write_json_file;
use crawldex::{ConcurrentInvertedIndex, InvertedIndex};
use serde_json::{json, Value};
use std::fs;

#[test]
fn index_json_shape() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_corpus(dir.path(), &[("b.txt", "Beta alpha beta")]);
    let location = location_of(&paths[0]);
    let index = sequential(dir.path());

    let text = index.index_json().unwrap();
    assert!(text.starts_with("{\n  \"alpha\": {"), "{}", text);

    let parsed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        parsed,
        json!({
            "alpha": { location.as_str(): [2] },
            "beta": { location.as_str(): [1, 3] },
        })
    );
}

#[test]
fn counts_json_shape() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_corpus(dir.path(), &[("a.txt", "one two three"), ("b.txt", "four")]);
    let index = concurrent(dir.path(), 2);

    let parsed: Value = serde_json::from_str(&index.counts_json().unwrap()).unwrap();
    assert_eq!(
        parsed,
        json!({
            location_of(&paths[0]): 3,
            location_of(&paths[1]): 1,
        })
    );
}

#[test]
fn empty_indexes_render_as_empty_objects() {
    assert_eq!(InvertedIndex::new().index_json().unwrap(), "{}");
    assert_eq!(ConcurrentInvertedIndex::new().counts_json().unwrap(), "{}");
}

#[test]
fn sequential_and_concurrent_json_are_identical() {
    let dir = tempfile::tempdir().unwrap();
    write_corpus(
        dir.path(),
        &[("x/1.txt", "zeta alpha mu"), ("x/2.txt", "mu mu alpha"), ("3.txt", "omega")],
    );
    let out = tempfile::tempdir().unwrap();
    let path = out.path().join("nested/index.json");

    let expected = sequential(dir.path()).index_json().unwrap();
    let actual = concurrent(dir.path(), 4).index_json().unwrap();
    write_json_file(&path, &actual).unwrap();

    assert_eq!(fs::read_to_string(path).unwrap(), expected);
}
