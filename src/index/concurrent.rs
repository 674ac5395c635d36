// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Thread-safe inverted index.
//!
//! One `parking_lot::RwLock` guards the whole structure. Coarse, but writes
//! arrive one document at a time: workers build a private [`InvertedIndex`]
//! per file or page and fold it in with a single [`add_index`] call, so the
//! write lock is taken once per document rather than once per token.
//!
//! Single accessors take a fair shared lock: once a writer is queued, new
//! readers wait behind it. [`ConcurrentInvertedIndex::read`] and `search`
//! use `read_recursive` instead, since a composite read may call back into
//! the index while already holding the lock. Guards are dropped on every
//! exit path, panics included.
//!
//! [`add_index`]: ConcurrentInvertedIndex::add_index

use std::collections::{BTreeMap, BTreeSet};

use parking_lot::RwLock;

use super::{IndexRead, IndexWrite, InvertedIndex};
use crate::error::Result;
use crate::scoring::Score;
use crate::search::SearchMode;

#[derive(Debug, Default)]
pub struct ConcurrentInvertedIndex {
    inner: RwLock<InvertedIndex>,
}

impl From<InvertedIndex> for ConcurrentInvertedIndex {
    fn from(index: InvertedIndex) -> Self {
        Self {
            inner: RwLock::new(index),
        }
    }
}

impl ConcurrentInvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` against a read-only view of the index under one shared lock.
    ///
    /// Used for composite reads that must see a single consistent state.
    /// Do not block on I/O inside `f`.
    pub fn read<T>(&self, f: impl FnOnce(&InvertedIndex) -> T) -> T {
        let guard = self.inner.read_recursive();
        f(&guard)
    }

    fn view<T>(&self, f: impl FnOnce(&InvertedIndex) -> T) -> T {
        let guard = self.inner.read();
        f(&guard)
    }

    pub fn add(&self, term: &str, location: &str, position: usize) -> bool {
        self.inner.write().add(term, location, position)
    }

    pub fn add_counts(&self, location: &str, count: usize) -> bool {
        self.inner.write().add_counts(location, count)
    }

    /// Merge a private index in one write-locked step.
    pub fn add_index(&self, other: InvertedIndex) {
        if other.is_empty() {
            return;
        }
        self.inner.write().add_index(other);
    }

    /// Index one document via a local index, taking the write lock once.
    pub fn add_document(&self, location: &str, tokens: &[String]) -> usize {
        let mut local = InvertedIndex::new();
        let added = local.add_document(location, tokens);
        self.add_index(local);
        added
    }

    /// Deep copy of the current state.
    pub fn snapshot(&self) -> InvertedIndex {
        self.view(InvertedIndex::clone)
    }

    pub fn into_inner(self) -> InvertedIndex {
        self.inner.into_inner()
    }

    pub fn index_json(&self) -> Result<String> {
        self.view(InvertedIndex::index_json)
    }

    pub fn counts_json(&self) -> Result<String> {
        self.view(InvertedIndex::counts_json)
    }
}

impl IndexWrite for ConcurrentInvertedIndex {
    fn add(&mut self, term: &str, location: &str, position: usize) -> bool {
        self.inner.get_mut().add(term, location, position)
    }

    fn add_counts(&mut self, location: &str, count: usize) -> bool {
        self.inner.get_mut().add_counts(location, count)
    }

    fn add_index(&mut self, other: InvertedIndex) {
        self.inner.get_mut().add_index(other);
    }
}

impl IndexRead for ConcurrentInvertedIndex {
    fn word_count(&self) -> usize {
        self.view(InvertedIndex::word_count)
    }

    fn location_count(&self) -> usize {
        self.view(InvertedIndex::location_count)
    }

    fn terms(&self) -> Vec<String> {
        self.view(InvertedIndex::terms)
    }

    fn terms_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.view(|index| index.terms_with_prefix(prefix))
    }

    fn locations_of(&self, term: &str) -> Vec<String> {
        self.view(|index| index.locations_of(term))
    }

    fn positions_of(&self, term: &str, location: &str) -> BTreeSet<usize> {
        self.view(|index| index.positions_of(term, location))
    }

    fn position_count(&self, term: &str, location: &str) -> usize {
        self.view(|index| index.position_count(term, location))
    }

    fn has_term(&self, term: &str) -> bool {
        self.view(|index| index.has_term(term))
    }

    fn has_location(&self, term: &str, location: &str) -> bool {
        self.view(|index| index.has_location(term, location))
    }

    fn has_position(&self, term: &str, location: &str, position: usize) -> bool {
        self.view(|index| index.has_position(term, location, position))
    }

    fn term_count_of(&self, location: &str) -> usize {
        self.view(|index| index.term_count_of(location))
    }

    fn counts(&self) -> BTreeMap<String, usize> {
        self.view(InvertedIndex::counts)
    }

    /// Whole-query matching under a single read lock.
    fn search(&self, tokens: &BTreeSet<String>, mode: SearchMode) -> Vec<Score> {
        self.read(|index| index.search(tokens, mode))
    }
}
