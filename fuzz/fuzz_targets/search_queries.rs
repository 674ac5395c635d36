// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for query handling.
//!
//! Throws arbitrary byte sequences at the query processors and checks that
//! they never panic, that blank queries produce no entry, and that exact hits
//! are always a subset of partial hits.

#![no_main]

use crawldex::search::canonical_query;
use crawldex::{
    IndexWrite, InvertedIndex, QueryProcessor, SearchMode, SequentialQueryProcessor, Stemmer,
};
use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;

fn index() -> &'static InvertedIndex {
    static INDEX: OnceLock<InvertedIndex> = OnceLock::new();
    INDEX.get_or_init(|| {
        let stemmer = Stemmer::new();
        let mut index = InvertedIndex::new();
        let docs = [
            ("a.txt", "The quick brown fox jumps over the lazy dog"),
            ("b.txt", "Crème brûlée über naïve café façade"),
            ("dir/c.txt", "running runners ran; indexes indexing indexed"),
        ];
        for (location, text) in docs {
            index.add_document(location, &crawldex::text::stem_line(text, &stemmer));
        }
        index
    })
}

fuzz_target!(|query: &[u8]| {
    let line = String::from_utf8_lossy(query);
    let line: String = line.chars().take(200).collect();

    let stemmer = Stemmer::new();
    let (key, tokens) = canonical_query(&line, &stemmer);

    assert_eq!(key.is_empty(), tokens.is_empty());

    let mut exact = SequentialQueryProcessor::new(index(), SearchMode::Exact);
    let mut partial = SequentialQueryProcessor::new(index(), SearchMode::Partial);
    exact.process_line(&line);
    partial.process_line(&line);

    if key.is_empty() {
        assert_eq!(exact.query_count(), 0);
        return;
    }

    let exact_rows = exact.get(&key).expect("exact entry");
    let partial_rows = partial.get(&key).expect("partial entry");
    for row in exact_rows {
        assert!(partial_rows.iter().any(|p| p.location == row.location));
    }
});
