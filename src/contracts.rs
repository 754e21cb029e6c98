// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for the structures every query relies on.
//!
//! These are debug-mode assertions:
//!
//! 1. **Zero-cost in release builds** (`debug_assert!`)
//! 2. **Early failure detection** right after a build, not at the first wrong answer
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract Function              | Property                                       |
//! |--------------------------------|------------------------------------------------|
//! | `check_suffix_array_complete`  | SA is a permutation of `[0, n)`                |
//! | `check_suffix_array_sorted`    | adjacent suffixes ordered (sentinels maximal)  |
//! | `check_lcp_correct`            | `lcp[i]` = shared prefix of neighbours         |
//! | `check_match_range`            | match range lies within the searchable block   |
//! | `check_children_sorted`        | radix children ordered by first edge symbol    |
//! | `check_branching`              | non-root internal radix nodes branch           |
//! | `check_interval_nested`        | child leaf interval inside parent's            |
//! | `check_leaf_interval`          | a leaf covers exactly one leaf slot            |
//! | `check_interval_node`          | interval-tree `max_end` and AVL balance        |
//!
//! # Usage
//!
//! ```ignore
//! // In debug builds, this panics if the invariant is violated
//! contracts::check_suffix_array_sorted(&corpus, &suffix_array);
//!
//! // In release builds, this is a no-op
//! ```

use crate::corpus::Corpus;
use crate::types::{MatchRange, Offset, Symbol};

// ============================================================================
// SUFFIX ARRAY CONTRACTS
// ============================================================================

/// Check that the suffix array holds every corpus position exactly once.
///
/// # Panics (debug builds only)
/// Panics on a wrong length, an out-of-range offset, or a repeated offset.
#[inline]
pub fn check_suffix_array_complete(corpus: &Corpus, suffix_array: &[Offset]) {
    debug_assert_eq!(
        suffix_array.len(),
        corpus.len(),
        "Contract violation: SuffixArray.Complete - len {} != corpus len {}",
        suffix_array.len(),
        corpus.len()
    );

    let mut seen = vec![false; corpus.len()];
    for (i, &pos) in suffix_array.iter().enumerate() {
        let pos = pos as usize;
        debug_assert!(
            pos < seen.len(),
            "Contract violation: SuffixArray.Complete - sa[{}] = {} out of range",
            i,
            pos
        );
        if pos < seen.len() {
            debug_assert!(
                !seen[pos],
                "Contract violation: SuffixArray.Complete - offset {} appears twice",
                pos
            );
            seen[pos] = true;
        }
    }
}

/// Check that adjacent suffixes are ordered.
///
/// # Panics (debug builds only)
/// Panics if any adjacent pair is out of order.
#[inline]
pub fn check_suffix_array_sorted(corpus: &Corpus, suffix_array: &[Offset]) {
    for i in 1..suffix_array.len() {
        let prev = corpus.suffix(suffix_array[i - 1]);
        let curr = corpus.suffix(suffix_array[i]);
        debug_assert!(
            prev <= curr,
            "Contract violation: SuffixArray.Sorted - sa[{}] = {} sorts after sa[{}] = {}",
            i - 1,
            suffix_array[i - 1],
            i,
            suffix_array[i]
        );
    }
}

/// Check every LCP entry against a direct comparison.
///
/// # Panics (debug builds only)
/// Panics if LCP values are incorrect.
#[inline]
pub fn check_lcp_correct(corpus: &Corpus, suffix_array: &[Offset], lcp: &[u32]) {
    debug_assert_eq!(
        lcp.len(),
        suffix_array.len(),
        "Contract violation: LcpCorrect - lcp.len() {} != suffix_array.len() {}",
        lcp.len(),
        suffix_array.len()
    );

    if let Some(&first) = lcp.first() {
        debug_assert_eq!(
            first, 0,
            "Contract violation: LcpCorrect - lcp[0] = {} (expected 0)",
            first
        );
    }

    for i in 1..suffix_array.len().min(lcp.len()) {
        let prev = corpus.suffix(suffix_array[i - 1]);
        let curr = corpus.suffix(suffix_array[i]);
        let expected = prev.iter().zip(curr).take_while(|(a, b)| a == b).count();
        debug_assert_eq!(
            lcp[i] as usize, expected,
            "Contract violation: LcpCorrect - lcp[{}] = {} (expected {})",
            i, lcp[i], expected
        );
    }
}

/// Check a match range against the block it was searched in.
#[inline]
pub fn check_match_range(range: MatchRange, searchable_len: usize) {
    debug_assert!(
        range.lo <= range.hi && range.hi <= searchable_len,
        "Contract violation: match range [{}, {}) outside [0, {})",
        range.lo,
        range.hi,
        searchable_len
    );
}

// ============================================================================
// RADIX TREE CONTRACTS
// ============================================================================

#[inline]
pub fn check_children_sorted(node: usize, children: &[(Symbol, u32)]) {
    debug_assert!(
        children.windows(2).all(|pair| pair[0].0 < pair[1].0),
        "Contract violation: radix node {} has unsorted or duplicate child keys",
        node
    );
}

/// Every internal node except the root has at least two children.
#[inline]
pub fn check_branching(node: usize, is_root: bool, child_count: usize) {
    debug_assert!(
        is_root || child_count >= 2,
        "Contract violation: radix node {} is internal with {} child(ren)",
        node,
        child_count
    );
}

#[inline]
pub fn check_interval_nested(parent: (u32, u32), child: (u32, u32)) {
    debug_assert!(
        parent.0 <= child.0 && child.1 <= parent.1 && child.0 < child.1,
        "Contract violation: leaf interval {:?} not nested in {:?}",
        child,
        parent
    );
}

#[inline]
pub fn check_leaf_interval(node: usize, lo: u32, hi: u32) {
    debug_assert_eq!(
        hi,
        lo + 1,
        "Contract violation: radix leaf {} covers [{}, {})",
        node,
        lo,
        hi
    );
}

// ============================================================================
// INTERVAL TREE CONTRACTS
// ============================================================================

/// Check one interval-tree node against its children's summaries.
///
/// `left`/`right` are `(max_end, height)` of each child, if present.
#[inline]
pub fn check_interval_node(
    end: u64,
    max_end: u64,
    height: u32,
    left: Option<(u64, u32)>,
    right: Option<(u64, u32)>,
) {
    let expected_max = [left, right]
        .iter()
        .flatten()
        .map(|&(child_max, _)| child_max)
        .fold(end, u64::max);
    debug_assert_eq!(
        max_end, expected_max,
        "Contract violation: IntervalTree.MaxEnd - max_end {} (expected {})",
        max_end, expected_max
    );

    let lh = left.map_or(0, |(_, h)| h);
    let rh = right.map_or(0, |(_, h)| h);
    debug_assert_eq!(
        height,
        1 + lh.max(rh),
        "Contract violation: IntervalTree.Height - height {} with children {} / {}",
        height,
        lh,
        rh
    );
    debug_assert!(
        lh.abs_diff(rh) <= 1,
        "Contract violation: IntervalTree.Balanced - child heights {} / {}",
        lh,
        rh
    );
}
