// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Every backend answers every query like brute force does.

use super::common::{brute_force_locate, build_all, corpus_strategy, located, pattern_strategy};
use haystack::Corpus;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// `locate` equals the brute-force occurrence set, with no duplicates.
    #[test]
    fn prop_locate_matches_brute_force(
        strings in corpus_strategy(),
        pattern in pattern_strategy(),
    ) {
        let corpus = Corpus::build(&strings).unwrap();
        let expected = brute_force_locate(&corpus, &pattern);
        for haystack in build_all(&strings) {
            prop_assert_eq!(located(haystack.as_ref(), &pattern), expected.clone());
        }
    }

    #[test]
    fn prop_count_equals_locate_len(
        strings in corpus_strategy(),
        pattern in pattern_strategy(),
    ) {
        for haystack in build_all(&strings) {
            let count = haystack.count(&pattern).unwrap();
            prop_assert_eq!(count, haystack.locate(&pattern).unwrap().count());
            prop_assert_eq!(count > 0, haystack.contains(&pattern).unwrap());
        }
    }

    /// Substrings actually taken from the corpus always hit.
    #[test]
    fn prop_every_substring_is_found(
        strings in corpus_strategy(),
        pick in any::<prop::sample::Index>(),
        span in (0usize..8, 1usize..6),
    ) {
        let source = pick.get(&strings);
        let start = span.0 % source.len();
        let end = (start + span.1).min(source.len());
        let pattern = &source[start..end];
        for haystack in build_all(&strings) {
            prop_assert!(haystack.contains(pattern).unwrap());
        }
    }

    /// Patterns longer than every string never match.
    #[test]
    fn prop_overlong_pattern_misses(strings in corpus_strategy()) {
        let longest = strings.iter().map(Vec::len).max().unwrap_or(0);
        let pattern = vec![b'a'; longest + 1];
        for haystack in build_all(&strings) {
            prop_assert_eq!(haystack.count(&pattern).unwrap(), 0);
        }
    }

    #[test]
    fn prop_locate_sorted_is_sorted(
        strings in corpus_strategy(),
        pattern in pattern_strategy(),
    ) {
        for haystack in build_all(&strings) {
            let sorted = haystack.locate_sorted(&pattern).unwrap();
            prop_assert!(sorted.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }
}
