// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The inverted index: term → location → positions, plus location → term count.
//!
//! Two implementations share one pair of capability traits:
//! - [`InvertedIndex`]: plain, single-owner, mutated through `&mut self`
//! - [`ConcurrentInvertedIndex`]: the same index behind one read/write lock,
//!   shared across worker threads through `Arc`
//!
//! Code that only reads (query matching, JSON output) is written against
//! [`IndexRead`]; code that only writes a document at a time (the sequential
//! builder) against [`IndexWrite`]. Neither trait ever hands out references
//! into the backing maps. Accessors return owned snapshots and answer
//! missing keys with empty/zero values.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **COUNTED_LOCATIONS**: a location is in `counts` iff it contributed at least one term
//! 2. **COUNT_COVERS_POSITIONS**: `counts[loc] >= max(positions)` for every term at `loc`
//! 3. **APPEND_ONLY**: no operation removes a term, location, position or count

mod concurrent;
mod inverted;

use std::collections::{BTreeMap, BTreeSet};

pub use concurrent::ConcurrentInvertedIndex;
pub use inverted::InvertedIndex;

use crate::scoring::Score;
use crate::search::{rank, SearchMode};

/// Read capability shared by both index flavors.
pub trait IndexRead {
    /// Number of distinct terms.
    fn word_count(&self) -> usize;

    /// Number of locations with a recorded term count.
    fn location_count(&self) -> usize;

    /// All terms in lexicographic order.
    fn terms(&self) -> Vec<String>;

    /// Terms that start with `prefix`, in lexicographic order. Includes `prefix` itself if indexed.
    fn terms_with_prefix(&self, prefix: &str) -> Vec<String>;

    /// Locations containing `term`, in lexicographic order.
    fn locations_of(&self, term: &str) -> Vec<String>;

    /// 1-based positions of `term` in `location`.
    fn positions_of(&self, term: &str, location: &str) -> BTreeSet<usize>;

    /// Number of positions of `term` in `location`, without copying them.
    fn position_count(&self, term: &str, location: &str) -> usize;

    fn has_term(&self, term: &str) -> bool;

    fn has_location(&self, term: &str, location: &str) -> bool;

    fn has_position(&self, term: &str, location: &str, position: usize) -> bool;

    /// Total terms parsed from `location`, or 0 if unknown.
    fn term_count_of(&self, location: &str) -> usize;

    /// Snapshot of every location's term count.
    fn counts(&self) -> BTreeMap<String, usize>;

    /// Index terms a query token resolves to under `mode`.
    fn matching_terms(&self, token: &str, mode: SearchMode) -> Vec<String> {
        match mode {
            SearchMode::Exact if self.has_term(token) => vec![token.to_owned()],
            SearchMode::Exact => Vec::new(),
            SearchMode::Partial => self.terms_with_prefix(token),
        }
    }

    /// Ranked results for a set of query tokens.
    fn search(&self, tokens: &BTreeSet<String>, mode: SearchMode) -> Vec<Score> {
        rank(self, tokens, mode)
    }
}

/// Write capability shared by both index flavors.
pub trait IndexWrite {
    /// Record `term` at 0-based `position` of `location` (stored 1-based).
    /// Returns `false` if that position was already recorded.
    fn add(&mut self, term: &str, location: &str, position: usize) -> bool;

    /// Record the total term count of `location`. Rejects counts below 1.
    fn add_counts(&mut self, location: &str, count: usize) -> bool;

    /// Merge another index into this one. Counts are summed, never overwritten.
    fn add_index(&mut self, other: InvertedIndex);

    /// Index one document's token stream in order. Returns the number of tokens.
    fn add_document(&mut self, location: &str, tokens: &[String]) -> usize {
        for (position, token) in tokens.iter().enumerate() {
            self.add(token, location, position);
        }
        if !tokens.is_empty() {
            self.add_counts(location, tokens.len());
        }
        tokens.len()
    }
}
