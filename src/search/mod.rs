// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query processing: from raw query lines to ranked result lists.
//!
//! Every line is reduced to a canonical key (distinct stems, sorted,
//! space-joined). Two lines with the same key share one result list, which
//! is computed at most once.
//!
//! ```text
//! "Cats and the CAT"  ──▶  {"and", "cat", "the"}  ──▶  "and cat the"
//! ```
//!
//! Matching resolves each query token to a set of index terms, `{token}` in
//! exact mode or every term with `token` as a prefix in partial mode, then
//! accumulates one [`Score`] per location. Accumulation is plain addition, so
//! the final list depends only on the index, never on the order tasks ran.

mod parallel;

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use tracing::{debug, warn};

pub use parallel::ConcurrentQueryProcessor;

use crate::error::{Error, Result};
use crate::index::IndexRead;
use crate::json::to_pretty_json;
use crate::scoring::{sort_scores, Score};
use crate::text::{unique_stems, Stemmer};

/// Query → ranked results, keys in lexicographic order.
pub type QueryResults = BTreeMap<String, Vec<Score>>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SearchMode {
    /// A token matches only the identical term.
    Exact,
    /// A token matches every term it is a prefix of.
    #[default]
    Partial,
}

impl SearchMode {
    pub fn from_exact(exact: bool) -> Self {
        if exact {
            SearchMode::Exact
        } else {
            SearchMode::Partial
        }
    }
}

/// Canonical query key and its tokens. The key is empty when no stems survive.
pub fn canonical_query(line: &str, stemmer: &Stemmer) -> (String, BTreeSet<String>) {
    let tokens = unique_stems(line, stemmer);
    let key = tokens.iter().map(String::as_str).collect::<Vec<_>>().join(" ");
    (key, tokens)
}

/// Accumulate and rank scores for `tokens` against `index`.
pub fn rank<R: IndexRead + ?Sized>(
    index: &R,
    tokens: &BTreeSet<String>,
    mode: SearchMode,
) -> Vec<Score> {
    let mut rows: HashMap<String, Score> = HashMap::new();

    for token in tokens {
        for term in index.matching_terms(token, mode) {
            for location in index.locations_of(&term) {
                let matches = index.position_count(&term, &location);
                let total = index.term_count_of(&location);
                rows.entry(location.clone())
                    .or_insert_with(|| Score::new(location))
                    .accumulate(matches, total);
            }
        }
    }

    let mut scores: Vec<Score> = rows.into_values().collect();
    sort_scores(&mut scores);
    scores
}

/// Shared surface of the sequential and concurrent processors.
pub trait QueryProcessor {
    /// Handle one raw query line. Empty or already-seen queries are skipped.
    fn process_line(&mut self, line: &str);

    /// Snapshot of all results so far.
    fn results(&self) -> QueryResults;

    /// Called once all lines of a file have been submitted.
    fn finish(&mut self) {}

    /// Process every line of a query file.
    ///
    /// Opening the file is the only failure returned. A line that is not
    /// valid UTF-8 is logged and skipped; a read error midway is logged and
    /// ends the batch with the lines already submitted.
    fn process_file(&mut self, path: &Path) -> Result<()> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let mut reader = BufReader::new(file);
        let mut buf = Vec::new();
        let mut submitted = 0usize;
        let mut line_no = 0usize;

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => line_no += 1,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!(path = %path.display(), "stopped reading queries: {}", e);
                    break;
                }
            }

            match std::str::from_utf8(&buf) {
                Ok(line) => {
                    self.process_line(line.trim_end_matches(['\n', '\r']));
                    submitted += 1;
                }
                Err(e) => warn!(path = %path.display(), line = line_no, "skipping query: {}", e),
            }
        }

        self.finish();
        debug!(path = %path.display(), lines = submitted, "query file processed");
        Ok(())
    }

    fn query_count(&self) -> usize {
        self.results().len()
    }

    /// `{ query: [ {count, score, where} ] }` as pretty JSON.
    fn results_json(&self) -> Result<String> {
        to_pretty_json(&self.results())
    }
}

/// Single-threaded processor over any readable index.
pub struct SequentialQueryProcessor<'a, R: IndexRead + ?Sized> {
    index: &'a R,
    mode: SearchMode,
    stemmer: Stemmer,
    results: QueryResults,
}

impl<'a, R: IndexRead + ?Sized> SequentialQueryProcessor<'a, R> {
    pub fn new(index: &'a R, mode: SearchMode) -> Self {
        Self {
            index,
            mode,
            stemmer: Stemmer::new(),
            results: QueryResults::new(),
        }
    }

    /// Results for one canonical key, if computed.
    pub fn get(&self, key: &str) -> Option<&[Score]> {
        self.results.get(key).map(Vec::as_slice)
    }
}

impl<R: IndexRead + ?Sized> QueryProcessor for SequentialQueryProcessor<'_, R> {
    fn process_line(&mut self, line: &str) {
        let (key, tokens) = canonical_query(line, &self.stemmer);
        if key.is_empty() || self.results.contains_key(&key) {
            return;
        }
        let scores = self.index.search(&tokens, self.mode);
        self.results.insert(key, scores);
    }

    fn results(&self) -> QueryResults {
        self.results.clone()
    }

    fn query_count(&self) -> usize {
        self.results.len()
    }
}
