//! Ordering of result rows.

use super::common::{add_doc, query_sequential};
use crawldex::{InvertedIndex, SearchMode};

fn index(docs: &[(&str, &str)]) -> InvertedIndex {
    let mut index = InvertedIndex::new();
    for (location, text) in docs {
        add_doc(&mut index, location, text);
    }
    index
}

fn locations(index: &InvertedIndex, query: &str, mode: SearchMode) -> Vec<String> {
    query_sequential(index, &[query], mode)
        .remove(query)
        .unwrap()
        .into_iter()
        .map(|row| row.location)
        .collect()
}

#[test]
fn score_outranks_count() {
    let index = index(&[("dense.txt", "cat"), ("long.txt", "cat cat dog dog dog dog")]);
    assert_eq!(locations(&index, "cat", SearchMode::Exact), vec!["dense.txt", "long.txt"]);
}

#[test]
fn equal_scores_fall_back_to_count() {
    // 2/4 and 1/2
    let index = index(&[("few.txt", "cat dog"), ("many.txt", "cat cat dog dog")]);
    assert_eq!(locations(&index, "cat", SearchMode::Exact), vec!["many.txt", "few.txt"]);
}

#[test]
fn full_ties_fall_back_to_location() {
    let index = index(&[("b.txt", "cat dog"), ("a.txt", "cat dog"), ("c/a.txt", "cat dog")]);
    assert_eq!(
        locations(&index, "cat", SearchMode::Exact),
        vec!["a.txt", "b.txt", "c/a.txt"]
    );
}

#[test]
fn location_ties_compare_path_segments() {
    let index = index(&[("a-b.txt", "cat"), ("a/b.txt", "cat")]);
    assert_eq!(locations(&index, "cat", SearchMode::Exact), vec!["a/b.txt", "a-b.txt"]);
}

#[test]
fn partial_matches_add_up_across_terms() {
    let index = index(&[("one.txt", "car cat dog"), ("two.txt", "cat dog dog")]);
    let results = query_sequential(&index, &["ca"], SearchMode::Partial);
    let rows = &results["ca"];

    assert_eq!(rows[0].location, "one.txt");
    assert_eq!(rows[0].count, 2);
    assert!((rows[0].score - 2.0 / 3.0).abs() < 1e-12);
    assert_eq!(rows[1].count, 1);
}

#[test]
fn multi_word_queries_sum_per_location() {
    let index = index(&[("x.txt", "cat dog bird fish"), ("y.txt", "cat cat cat fish")]);
    let results = query_sequential(&index, &["dog cat"], SearchMode::Exact);
    let rows = &results["cat dog"];

    assert_eq!(rows[0].location, "y.txt");
    assert_eq!(rows[0].count, 3);
    assert_eq!(rows[1].location, "x.txt");
    assert_eq!(rows[1].count, 2);
    assert!((rows[1].score - 0.5).abs() < 1e-12);
}
