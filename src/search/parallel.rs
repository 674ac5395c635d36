// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Concurrent query processing: one work-queue task per query line.
//!
//! Each task owns its own stemmer. The only shared mutable state is the
//! results map, and a key is written at most once: the first task to finish
//! a canonical key wins, later duplicates are dropped. A task also checks the
//! map before matching, so a duplicate submitted after its twin finished does
//! no work at all.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::warn;

use super::{canonical_query, QueryProcessor, QueryResults, SearchMode};
use crate::index::{ConcurrentInvertedIndex, IndexRead};
use crate::queue::WorkQueue;
use crate::text::Stemmer;

pub struct ConcurrentQueryProcessor<'q> {
    index: Arc<ConcurrentInvertedIndex>,
    mode: SearchMode,
    queue: &'q WorkQueue,
    results: Arc<Mutex<QueryResults>>,
}

impl<'q> ConcurrentQueryProcessor<'q> {
    pub fn new(index: Arc<ConcurrentInvertedIndex>, mode: SearchMode, queue: &'q WorkQueue) -> Self {
        Self {
            index,
            mode,
            queue,
            results: Arc::new(Mutex::new(QueryResults::new())),
        }
    }
}

impl QueryProcessor for ConcurrentQueryProcessor<'_> {
    /// Submit the line as a task. Results are complete only after [`QueryProcessor::finish`].
    fn process_line(&mut self, line: &str) {
        let line = line.to_owned();
        let index = Arc::clone(&self.index);
        let results = Arc::clone(&self.results);
        let mode = self.mode;

        let submitted = self.queue.execute(move || {
            let stemmer = Stemmer::new();
            let (key, tokens) = canonical_query(&line, &stemmer);
            if key.is_empty() || results.lock().contains_key(&key) {
                return;
            }

            let scores = index.search(&tokens, mode);
            results.lock().entry(key).or_insert(scores);
        });

        if let Err(e) = submitted {
            warn!("query dropped: {}", e);
        }
    }

    /// Wait for every submitted query.
    fn finish(&mut self) {
        self.queue.finish();
    }

    fn results(&self) -> QueryResults {
        self.results.lock().clone()
    }

    fn query_count(&self) -> usize {
        self.results.lock().len()
    }
}
