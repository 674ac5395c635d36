// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how score rows get sorted.
//!
//! Sort order:
//! 1. **Score** - descending
//! 2. **Count** - descending
//! 3. **Location** - ascending, compared one `/`-separated segment at a time
//!
//! Locations are unique within one result list, so the order is total and a
//! re-run always yields the same list.

use std::cmp::Ordering;

use super::Score;

/// Compare two result rows for ranking. `Ordering::Less` means `a` ranks first.
pub fn compare_scores(a: &Score, b: &Score) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.count.cmp(&a.count))
        .then_with(|| compare_locations(&a.location, &b.location))
}

/// Path-segment-aware location order.
///
/// `"a/b.txt"` sorts before `"a-b.txt"` because the first segments compare as
/// `"a" < "a-b.txt"`, whereas a plain byte comparison would put `'-'` before `'/'`.
pub fn compare_locations(a: &str, b: &str) -> Ordering {
    a.split('/').cmp(b.split('/'))
}

pub fn sort_scores(scores: &mut [Score]) {
    scores.sort_by(compare_scores);
}
