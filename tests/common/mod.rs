//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use crawldex::{
    build_index, build_index_with_threads, ConcurrentInvertedIndex, ConcurrentQueryProcessor,
    IndexWrite, InvertedIndex, QueryProcessor, QueryResults, SearchMode,
    SequentialQueryProcessor, WorkQueue,
};

// Re-export canonical test utilities from crawldex::testing
pub use crawldex::testing::{index_of, write_corpus, StaticFetcher};

// ============================================================================
// CORPORA
// ============================================================================

/// A small mixed corpus: nested directories, a non-text file, an uppercase extension.
pub const CORPUS: &[(&str, &str)] = &[
    ("animals/cats.txt", "The cat sat on the mat.\nCats chase mice."),
    ("animals/dogs.txt", "Dogs bark. A dog chased the cat!"),
    ("animals/birds/owls.TEXT", "Owls hunt mice at night."),
    ("plants/trees.txt", "Running trees? Trees do not run."),
    ("plants/notes.md", "cat cat cat cat"),
    ("empty.txt", "12345 !!!"),
];

/// Queries exercising duplicates, stemming, blank lines and misses.
pub const QUERIES: &[&str] = &[
    "cat",
    "Cats",
    "mice cat",
    "cat MICE",
    "",
    "   ",
    "run",
    "dog bark",
    "zebra",
    "tre",
    "o",
];

// ============================================================================
// BUILDERS
// ============================================================================

pub fn sequential(root: &Path) -> InvertedIndex {
    let mut index = InvertedIndex::new();
    build_index(root, &mut index).unwrap();
    index
}

pub fn concurrent(root: &Path, threads: usize) -> Arc<ConcurrentInvertedIndex> {
    let index = Arc::new(ConcurrentInvertedIndex::new());
    build_index_with_threads(root, &index, threads).unwrap();
    index
}

/// Whitespace-split document added straight to any writable index.
pub fn add_doc<W: IndexWrite + ?Sized>(index: &mut W, location: &str, text: &str) {
    let tokens: Vec<String> = text.split_whitespace().map(str::to_owned).collect();
    index.add_document(location, &tokens);
}

// ============================================================================
// QUERIES
// ============================================================================

pub fn query_sequential(index: &InvertedIndex, lines: &[&str], mode: SearchMode) -> QueryResults {
    let mut processor = SequentialQueryProcessor::new(index, mode);
    for line in lines {
        processor.process_line(line);
    }
    processor.finish();
    processor.results()
}

pub fn query_concurrent(
    index: &Arc<ConcurrentInvertedIndex>,
    lines: &[&str],
    mode: SearchMode,
    threads: usize,
) -> QueryResults {
    let queue = WorkQueue::new(threads).unwrap();
    let mut processor = ConcurrentQueryProcessor::new(Arc::clone(index), mode, &queue);
    for line in lines {
        processor.process_line(line);
    }
    processor.finish();
    processor.results()
}
