// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Suffix array property tests.
//!
//! - Sortedness: suffixes are in sentinel-aware order
//! - Completeness: every position is represented exactly once
//! - LCP correctness: values match a direct comparison
//! - Data block: sentinel-only suffixes occupy the tail

use super::common::{binary_string, corpus_strategy, naive_lcp, naive_suffix_array};
use haystack::{is_suffix_array_sorted, Corpus, SuffixArray, SuffixArrayOptions};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// SA-IS agrees with a comparison sort.
    #[test]
    fn prop_matches_naive_sort(strings in corpus_strategy()) {
        let corpus = Corpus::build(&strings).unwrap();
        let sa = SuffixArray::build(&corpus, &SuffixArrayOptions::default()).unwrap();
        let expected = naive_suffix_array(&corpus);
        prop_assert_eq!(sa.as_slice(), expected.as_slice());
    }

    /// Full byte range, not just the small test alphabet.
    #[test]
    fn prop_sorted_over_binary(strings in prop::collection::vec(binary_string(40), 1..4)) {
        let corpus = Corpus::build(&strings).unwrap();
        let sa = SuffixArray::build(&corpus, &SuffixArrayOptions::default()).unwrap();
        prop_assert!(is_suffix_array_sorted(&corpus, sa.as_slice()));
    }

    #[test]
    fn prop_is_permutation(strings in corpus_strategy()) {
        let corpus = Corpus::build(&strings).unwrap();
        let sa = SuffixArray::build(&corpus, &SuffixArrayOptions::default()).unwrap();
        let mut sorted = sa.as_slice().to_vec();
        sorted.sort_unstable();
        let expected: Vec<u32> = (0..corpus.len() as u32).collect();
        prop_assert_eq!(sorted, expected);
    }

    #[test]
    fn prop_lcp_correct(strings in corpus_strategy()) {
        let corpus = Corpus::build(&strings).unwrap();
        let sa = SuffixArray::build(&corpus, &SuffixArrayOptions::default()).unwrap();
        let lcp = sa.lcp().unwrap();
        let expected = naive_lcp(&corpus, sa.as_slice());
        prop_assert_eq!(lcp, expected.as_slice());
    }

    /// Sentinels are maximal: the last `string_count` entries are the bare sentinels,
    /// in string order.
    #[test]
    fn prop_sentinel_suffixes_last(strings in corpus_strategy()) {
        let corpus = Corpus::build(&strings).unwrap();
        let sa = SuffixArray::build(&corpus, &SuffixArrayOptions::default()).unwrap();
        let tail = &sa.as_slice()[corpus.data_len()..];
        let sentinels: Vec<u32> = corpus
            .string_table()
            .entries()
            .iter()
            .map(|entry| entry.sentinel_offset())
            .collect();
        prop_assert_eq!(tail, sentinels.as_slice());
    }
}
