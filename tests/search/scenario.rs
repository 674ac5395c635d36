//! End-to-end query scenarios over files on disk.

use super::common::{query_sequential, sequential, write_corpus};
use crawldex::build::location_of;
use crawldex::{Error, QueryProcessor, SearchMode, SequentialQueryProcessor};
use serde_json::Value;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

#[test]
fn single_document_exact_partial_and_miss() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_corpus(dir.path(), &[("mat.txt", "the cat sat on the mat")]);
    let location = location_of(&paths[0]);
    let index = sequential(dir.path());

    let exact = query_sequential(&index, &["cat", "dog"], SearchMode::Exact);
    let partial = query_sequential(&index, &["ca", "dog"], SearchMode::Partial);

    let cat = &exact["cat"];
    assert_eq!(cat.len(), 1);
    assert_eq!(cat[0].count, 1);
    assert!(close(cat[0].score, 1.0 / 6.0));
    assert_eq!(cat[0].location, location);

    assert_eq!(partial["ca"], exact["cat"]);
    assert!(exact["dog"].is_empty());
    assert!(partial["dog"].is_empty());
}

#[test]
fn prefix_does_not_match_in_exact_mode() {
    let dir = tempfile::tempdir().unwrap();
    write_corpus(dir.path(), &[("mat.txt", "the cat sat on the mat")]);
    let index = sequential(dir.path());

    let exact = query_sequential(&index, &["ca"], SearchMode::Exact);
    assert!(exact["ca"].is_empty());
}

#[test]
fn stemmed_inflections_count_toward_the_same_term() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_corpus(dir.path(), &[("A.txt", "run running"), ("B.txt", "run")]);
    let index = sequential(dir.path());

    let results = query_sequential(&index, &["run"], SearchMode::Exact);
    let run = &results["run"];

    assert_eq!(run.len(), 2);
    assert_eq!(run[0].location, location_of(&paths[0]));
    assert_eq!(run[0].count, 2);
    assert_eq!(run[1].location, location_of(&paths[1]));
    assert_eq!(run[1].count, 1);
    assert!(close(run[0].score, 1.0));
    assert!(close(run[1].score, 1.0));
}

#[test]
fn query_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_corpus(
        dir.path(),
        &[
            ("docs/a.txt", "apples and oranges"),
            ("docs/b.txt", "orange juice"),
            ("queries.list", "Orange\n\noranges\napple JUICE\n  \n"),
        ],
    );
    let index = sequential(&dir.path().join("docs"));

    let mut processor = SequentialQueryProcessor::new(&index, SearchMode::Exact);
    processor.process_file(&paths[2]).unwrap();

    let results = processor.results();
    let keys: Vec<&str> = results.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["appl juic", "orang"]);
    assert_eq!(results["orang"].len(), 2);

    let json: Value = serde_json::from_str(&processor.results_json().unwrap()).unwrap();
    let first = &json["orang"][0];
    assert_eq!(first["count"], 1);
    assert_eq!(first["where"], location_of(&paths[1]).as_str());
}

#[test]
fn missing_query_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let index = crawldex::InvertedIndex::new();
    let mut processor = SequentialQueryProcessor::new(&index, SearchMode::Partial);

    let err = processor.process_file(&dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert_eq!(processor.query_count(), 0);
}

#[test]
fn undecodable_query_line_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    write_corpus(dir.path(), &[("docs/a.txt", "cat dog")]);
    let queries = dir.path().join("queries.bin");
    std::fs::write(&queries, b"cat\n\xff\xfe\ndog\r\n").unwrap();
    let index = sequential(&dir.path().join("docs"));

    let mut processor = SequentialQueryProcessor::new(&index, SearchMode::Exact);
    processor.process_file(&queries).unwrap();

    let results = processor.results();
    let keys: Vec<&str> = results.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["cat", "dog"]);
    assert_eq!(results["dog"].len(), 1);
}
