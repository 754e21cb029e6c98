// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::sync::Arc;

use haystack::{Corpus, Haystack, Occurrence, SuffixArrayIndex, SuffixArrayOptions};
use proptest::prelude::*;

// Re-export canonical oracles from haystack::testing
pub use haystack::testing::{
    brute_force_locate, brute_force_longest_prefix, brute_force_overlaps, brute_force_prefixed,
    build_all, naive_lcp, naive_suffix_array, substring_backends,
};

// ============================================================================
// FIXTURES
// ============================================================================

/// The two-string scenario every backend must answer identically.
pub const BANANA: &[&str] = &["banana", "ananas"];

/// Short English-ish vocabulary with lots of shared prefixes and suffixes.
pub const WORDS: &[&str] = &[
    "search", "searching", "research", "sea", "seal", "reach", "each", "ear", "hear",
    "heart", "art", "tar", "star", "start", "restart",
];

pub fn corpus(strings: &[&str]) -> Arc<Corpus> {
    Arc::new(Corpus::build(strings).expect("fixture corpus"))
}

pub fn suffix_array_index(strings: &[&str]) -> SuffixArrayIndex {
    SuffixArrayIndex::build(corpus(strings), &SuffixArrayOptions::default())
        .expect("fixture index")
}

/// `locate` on `haystack`, sorted for comparison against an oracle.
pub fn located(haystack: &dyn Haystack, pattern: &[u8]) -> Vec<Occurrence> {
    let mut found: Vec<_> = haystack.locate(pattern).expect("valid pattern").collect();
    found.sort_unstable();
    found
}

// ============================================================================
// STRATEGIES
// ============================================================================

/// Bytes from a small alphabet, so random patterns actually hit.
pub fn small_alphabet_string(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(b"abc".to_vec()), 1..=max_len)
}

/// A non-empty collection of non-empty strings over a small alphabet.
pub fn corpus_strategy() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(small_alphabet_string(12), 1..6)
}

/// Patterns from the same alphabet, including the empty pattern.
pub fn pattern_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(b"abc".to_vec()), 0..5)
}

/// Arbitrary non-NUL bytes: exercises the whole byte range.
pub fn binary_string(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(1u8..=255, 1..=max_len)
}

/// Intervals with `start <= end` over a small coordinate range.
pub fn interval_strategy() -> impl Strategy<Value = (u64, u64)> {
    (0u64..100, 0u64..30).prop_map(|(start, len)| (start, start + len))
}
