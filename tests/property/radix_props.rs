// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Radix tree property tests: whole-string mode, longest prefix, round-trip.

use std::sync::Arc;

use super::common::{
    brute_force_longest_prefix, brute_force_prefixed, corpus_strategy, located, pattern_strategy,
};
use haystack::{Corpus, Haystack, RadixMode, RadixTreeIndex, RadixTreeOptions, StringId};
use proptest::prelude::*;

fn build(corpus: &Arc<Corpus>, mode: RadixMode) -> RadixTreeIndex {
    RadixTreeIndex::build(Arc::clone(corpus), &RadixTreeOptions { mode }).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Whole-string results are the substring results filtered to offset 0.
    #[test]
    fn prop_whole_string_is_offset_zero(
        strings in corpus_strategy(),
        pattern in pattern_strategy(),
    ) {
        let corpus = Arc::new(Corpus::build(&strings).unwrap());
        let trie = build(&corpus, RadixMode::WholeString);
        prop_assert_eq!(
            located(&trie, &pattern),
            brute_force_prefixed(&corpus, &pattern)
        );
        prop_assert_eq!(
            trie.count(&pattern).unwrap(),
            brute_force_prefixed(&corpus, &pattern).len()
        );
    }

    #[test]
    fn prop_longest_prefix_matches_brute_force(
        strings in corpus_strategy(),
        query in pattern_strategy(),
    ) {
        let corpus = Arc::new(Corpus::build(&strings).unwrap());
        let expected = brute_force_longest_prefix(&corpus, &query);
        for mode in [RadixMode::Suffix, RadixMode::WholeString] {
            let tree = build(&corpus, mode);
            prop_assert_eq!(tree.longest_prefix(&query).unwrap(), expected);
        }
    }

    /// Every input string comes back out of the leaves, each once.
    #[test]
    fn prop_round_trip(strings in corpus_strategy()) {
        let corpus = Arc::new(Corpus::build(&strings).unwrap());
        let expected: Vec<(StringId, Vec<u8>)> = strings
            .iter()
            .enumerate()
            .map(|(i, s)| (StringId(i as u32), s.clone()))
            .collect();
        for mode in [RadixMode::Suffix, RadixMode::WholeString] {
            let mut recovered: Vec<_> = build(&corpus, mode).whole_strings().collect();
            recovered.sort();
            prop_assert_eq!(&recovered, &expected);
        }
    }

    /// A suffix tree over n data suffixes has n leaves and fewer than 2n nodes.
    #[test]
    fn prop_suffix_tree_size(strings in corpus_strategy()) {
        let corpus = Arc::new(Corpus::build(&strings).unwrap());
        let tree = build(&corpus, RadixMode::Suffix);
        prop_assert_eq!(tree.leaf_count(), corpus.data_len());
        prop_assert!(tree.node_count() < 2 * corpus.data_len() + 1);
    }
}
