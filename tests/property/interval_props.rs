// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Interval tree property tests against a linear scan.

use super::common::{brute_force_overlaps, interval_strategy};
use haystack::IntervalTree;
use proptest::prelude::*;

fn build(intervals: &[(u64, u64)]) -> IntervalTree<usize> {
    let mut tree = IntervalTree::new();
    for (i, &(start, end)) in intervals.iter().enumerate() {
        tree.insert(start, end, i).unwrap();
    }
    tree
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn prop_overlaps_match_brute_force(
        intervals in prop::collection::vec(interval_strategy(), 0..60),
        query in interval_strategy(),
    ) {
        let tree = build(&intervals);
        let mut found: Vec<usize> = tree
            .query_overlap(query.0, query.1)
            .unwrap()
            .map(|(_, &i)| i)
            .collect();
        found.sort_unstable();
        prop_assert_eq!(found, brute_force_overlaps(&intervals, query.0, query.1));
    }

    #[test]
    fn prop_empty_query_overlaps_nothing(
        intervals in prop::collection::vec(interval_strategy(), 0..60),
        point in 0u64..130,
    ) {
        let tree = build(&intervals);
        prop_assert_eq!(tree.query_overlap(point, point).unwrap().count(), 0);
    }

    /// Deleting every other interval leaves exactly the rest queryable.
    #[test]
    fn prop_delete_then_query(
        intervals in prop::collection::vec(interval_strategy(), 1..60),
        query in interval_strategy(),
    ) {
        let mut tree = build(&intervals);
        let mut kept = Vec::new();
        for (i, &(start, end)) in intervals.iter().enumerate() {
            if i % 2 == 0 {
                prop_assert!(tree.delete(start, end).unwrap().is_some());
            } else {
                kept.push((start, end));
            }
        }
        prop_assert_eq!(tree.len(), kept.len());

        // Payloads of duplicates may have swapped, so compare interval multisets.
        let mut found: Vec<(u64, u64)> = tree
            .query_overlap(query.0, query.1)
            .unwrap()
            .map(|(iv, _)| (iv.start, iv.end))
            .collect();
        found.sort_unstable();
        let mut expected: Vec<(u64, u64)> = brute_force_overlaps(&kept, query.0, query.1)
            .into_iter()
            .map(|i| kept[i])
            .collect();
        expected.sort_unstable();
        prop_assert_eq!(found, expected);
    }

    /// AVL height stays within 1.45 log2(n + 2).
    #[test]
    fn prop_height_logarithmic(intervals in prop::collection::vec(interval_strategy(), 1..200)) {
        let tree = build(&intervals);
        let bound = 1.45 * ((intervals.len() + 2) as f64).log2();
        prop_assert!(f64::from(tree.height()) <= bound.ceil());
    }

    #[test]
    fn prop_iter_in_order(intervals in prop::collection::vec(interval_strategy(), 0..60)) {
        let tree = build(&intervals);
        let keys: Vec<_> = tree.iter().map(|(iv, _)| (iv.start, iv.end)).collect();
        let mut expected = intervals.clone();
        expected.sort_unstable();
        prop_assert_eq!(keys, expected);
    }
}
