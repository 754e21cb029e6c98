// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for interval tree insert/delete/query sequences.
//!
//! Replays arbitrary operations against the tree and a plain vector. Overlap
//! queries must agree, and debug builds check the AVL and max-end invariants
//! on every rebalance.

#![no_main]

use arbitrary::Arbitrary;
use haystack::testing::brute_force_overlaps;
use haystack::IntervalTree;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Insert(u16, u16),
    Delete(u16, u16),
    Query(u16, u16),
}

fuzz_target!(|ops: Vec<Op>| {
    let mut tree = IntervalTree::new();
    let mut shadow: Vec<(u64, u64)> = Vec::new();

    for op in ops {
        match op {
            Op::Insert(a, b) => {
                let (start, end) = (u64::from(a), u64::from(b));
                if tree.insert(start, end, ()).is_ok() {
                    shadow.push((start, end));
                } else {
                    assert!(start > end);
                }
            }
            Op::Delete(a, b) => {
                let (start, end) = (u64::from(a), u64::from(b));
                let Ok(removed) = tree.delete(start, end) else {
                    assert!(start > end);
                    continue;
                };
                let position = shadow.iter().position(|&iv| iv == (start, end));
                assert_eq!(removed.is_some(), position.is_some());
                if let Some(position) = position {
                    shadow.swap_remove(position);
                }
            }
            Op::Query(a, b) => {
                let (start, end) = (u64::from(a), u64::from(b));
                let Ok(found) = tree.query_overlap(start, end) else {
                    assert!(start > end);
                    continue;
                };
                let mut found: Vec<(u64, u64)> = found.map(|(iv, _)| (iv.start, iv.end)).collect();
                found.sort_unstable();
                let mut expected: Vec<(u64, u64)> = brute_force_overlaps(&shadow, start, end)
                    .into_iter()
                    .map(|i| shadow[i])
                    .collect();
                expected.sort_unstable();
                assert_eq!(found, expected);
            }
        }
        assert_eq!(tree.len(), shadow.len());
    }
});
