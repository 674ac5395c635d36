// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Single-owner inverted index.
//!
//! Everything is a `BTreeMap`/`BTreeSet` so iteration (and therefore JSON
//! output and prefix scans) follows natural lexicographic key order.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound;

use super::{IndexRead, IndexWrite};
use crate::error::Result;
use crate::json::to_pretty_json;

type Postings = BTreeMap<String, BTreeSet<usize>>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InvertedIndex {
    /// term → location → 1-based positions
    terms: BTreeMap<String, Postings>,
    /// location → total terms parsed from it
    counts: BTreeMap<String, usize>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// `{ term: { location: [positions] } }` as pretty JSON.
    pub fn index_json(&self) -> Result<String> {
        to_pretty_json(&self.terms)
    }

    /// `{ location: count }` as pretty JSON.
    pub fn counts_json(&self) -> Result<String> {
        to_pretty_json(&self.counts)
    }

    /// Insert an already 1-based position.
    fn insert_position(&mut self, term: &str, location: &str, position: usize) -> bool {
        self.terms
            .entry(term.to_owned())
            .or_default()
            .entry(location.to_owned())
            .or_default()
            .insert(position)
    }

    fn postings(&self, term: &str, location: &str) -> Option<&BTreeSet<usize>> {
        self.terms.get(term).and_then(|locations| locations.get(location))
    }
}

impl IndexWrite for InvertedIndex {
    fn add(&mut self, term: &str, location: &str, position: usize) -> bool {
        self.insert_position(term, location, position + 1)
    }

    fn add_counts(&mut self, location: &str, count: usize) -> bool {
        if count < 1 {
            return false;
        }
        self.counts.insert(location.to_owned(), count);
        true
    }

    fn add_index(&mut self, other: InvertedIndex) {
        for (term, other_locations) in other.terms {
            match self.terms.entry(term) {
                Entry::Vacant(slot) => {
                    slot.insert(other_locations);
                }
                Entry::Occupied(mut slot) => {
                    let locations = slot.get_mut();
                    for (location, positions) in other_locations {
                        match locations.entry(location) {
                            Entry::Vacant(slot) => {
                                slot.insert(positions);
                            }
                            Entry::Occupied(mut slot) => slot.get_mut().extend(positions),
                        }
                    }
                }
            }
        }

        for (location, count) in other.counts {
            *self.counts.entry(location).or_insert(0) += count;
        }
    }
}

impl IndexRead for InvertedIndex {
    fn word_count(&self) -> usize {
        self.terms.len()
    }

    fn location_count(&self) -> usize {
        self.counts.len()
    }

    fn terms(&self) -> Vec<String> {
        self.terms.keys().cloned().collect()
    }

    fn terms_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.terms
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|(term, _)| term.starts_with(prefix))
            .map(|(term, _)| term.clone())
            .collect()
    }

    fn locations_of(&self, term: &str) -> Vec<String> {
        self.terms
            .get(term)
            .map(|locations| locations.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn positions_of(&self, term: &str, location: &str) -> BTreeSet<usize> {
        self.postings(term, location).cloned().unwrap_or_default()
    }

    fn position_count(&self, term: &str, location: &str) -> usize {
        self.postings(term, location).map_or(0, BTreeSet::len)
    }

    fn has_term(&self, term: &str) -> bool {
        self.terms.contains_key(term)
    }

    fn has_location(&self, term: &str, location: &str) -> bool {
        self.postings(term, location).is_some()
    }

    fn has_position(&self, term: &str, location: &str, position: usize) -> bool {
        self.postings(term, location)
            .is_some_and(|positions| positions.contains(&position))
    }

    fn term_count_of(&self, location: &str) -> usize {
        self.counts.get(location).copied().unwrap_or(0)
    }

    fn counts(&self) -> BTreeMap<String, usize> {
        self.counts.clone()
    }
}
