//! Query and ranking property tests.

use super::common::query_sequential;
use crawldex::search::rank;
use crawldex::{compare_scores, sort_scores, IndexWrite, InvertedIndex, SearchMode};
use proptest::prelude::*;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

// ============================================================================
// STRATEGIES
// ============================================================================

fn word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-d]{1,3}").unwrap()
}

fn index_strategy() -> impl Strategy<Value = InvertedIndex> {
    prop::collection::vec(prop::collection::vec(word_strategy(), 1..10), 1..6).prop_map(|docs| {
        let mut index = InvertedIndex::new();
        for (i, words) in docs.iter().enumerate() {
            index.add_document(&format!("doc{}.txt", i), words);
        }
        index
    })
}

fn tokens_strategy() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set(word_strategy(), 1..4)
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: every exact hit is a partial hit, scoring no higher.
    #[test]
    fn prop_exact_is_subset_of_partial(index in index_strategy(), tokens in tokens_strategy()) {
        let exact = rank(&index, &tokens, SearchMode::Exact);
        let partial: HashMap<String, f64> = rank(&index, &tokens, SearchMode::Partial)
            .into_iter()
            .map(|row| (row.location, row.score))
            .collect();

        for row in exact {
            let wider = partial.get(&row.location).copied();
            prop_assert!(wider.is_some(), "{} missing from partial results", row.location);
            prop_assert!(wider.unwrap() + 1e-12 >= row.score);
        }
    }

    /// Property: results are sorted, and sorting is a total order (re-sorting
    /// a reversed copy reproduces the list).
    #[test]
    fn prop_ranking_is_a_total_order(index in index_strategy(), tokens in tokens_strategy()) {
        let ranked = rank(&index, &tokens, SearchMode::Partial);
        for pair in ranked.windows(2) {
            prop_assert_eq!(compare_scores(&pair[0], &pair[1]), Ordering::Less);
        }

        let mut reversed: Vec<_> = ranked.iter().rev().cloned().collect();
        sort_scores(&mut reversed);
        prop_assert_eq!(reversed, ranked);
    }

    /// Property: word order and repetition do not change the canonical query.
    #[test]
    fn prop_canonical_key_ignores_order(index in index_strategy(), words in prop::collection::vec(word_strategy(), 1..5)) {
        let forward = words.join(" ");
        let mut shuffled = words.clone();
        shuffled.reverse();
        shuffled.extend(words.iter().take(1).cloned());
        let backward = shuffled.join(" ");

        let results = query_sequential(&index, &[forward.as_str(), backward.as_str()], SearchMode::Partial);
        prop_assert_eq!(results.len(), 1);
    }
}
