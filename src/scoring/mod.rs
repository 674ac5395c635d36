// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring: how a (query, location) pair gets its numbers.
//!
//! A score is plain term frequency: matched positions divided by the total
//! number of terms in the location. Contributions from several query tokens
//! (or several prefix-matched terms) simply add up, so the order in which
//! they are accumulated never changes the result.

pub mod ranking;

use serde::Serialize;

pub use ranking::{compare_locations, compare_scores, sort_scores};

/// One result row: how well `location` matches a query.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Score {
    /// Total matched positions across all matched terms.
    pub count: usize,
    /// Sum of `matches / total_terms` across all matched terms.
    pub score: f64,
    #[serde(rename = "where")]
    pub location: String,
}

impl Score {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            count: 0,
            score: 0.0,
            location: location.into(),
        }
    }

    /// Fold in one matched term: `matches` positions out of `total` terms.
    ///
    /// A zero `total` would mean the location has positions but no recorded
    /// count, which the index never allows; it contributes to `count` only.
    pub fn accumulate(&mut self, matches: usize, total: usize) {
        self.count += matches;
        if total > 0 {
            self.score += matches as f64 / total as f64;
        }
    }
}
