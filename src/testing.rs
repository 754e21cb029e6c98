// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Brute-force oracles shared across unit, property, and fuzz tests.
//!
//! This module is always compiled but hidden from documentation. Every function
//! here is the obviously-correct quadratic version of something the indexes do
//! fast; tests compare the two.

#![doc(hidden)]

use crate::corpus::Corpus;
use crate::haystack::{build_haystack, Backend, Haystack};
use crate::radix::{RadixMode, RadixTreeOptions};
use crate::sais::SuffixArrayOptions;
use crate::types::{Occurrence, Offset, StringId};

use std::sync::Arc;

/// Every `(string, offset)` where `pattern` occurs, sorted.
///
/// The empty pattern occurs at every offset `< len` of every string.
pub fn brute_force_locate(corpus: &Corpus, pattern: &[u8]) -> Vec<Occurrence> {
    let mut found = Vec::new();
    for id in 0..corpus.string_count() as u32 {
        let id = StringId(id);
        let Some(bytes) = corpus.string_bytes(id) else {
            continue;
        };
        if pattern.is_empty() {
            found.extend((0..bytes.len() as u32).map(|offset| Occurrence::new(id, offset)));
            continue;
        }
        for (offset, window) in bytes.windows(pattern.len()).enumerate() {
            if window == pattern {
                found.push(Occurrence::new(id, offset as u32));
            }
        }
    }
    found
}

/// Brute-force occurrences restricted to string starts.
pub fn brute_force_prefixed(corpus: &Corpus, pattern: &[u8]) -> Vec<Occurrence> {
    brute_force_locate(corpus, pattern)
        .into_iter()
        .filter(|occurrence| occurrence.offset == 0)
        .collect()
}

/// The longest string that is a prefix of `query`, highest id on ties.
pub fn brute_force_longest_prefix(corpus: &Corpus, query: &[u8]) -> Option<StringId> {
    let mut best: Option<(usize, StringId)> = None;
    for id in 0..corpus.string_count() as u32 {
        let id = StringId(id);
        let Some(bytes) = corpus.string_bytes(id) else {
            continue;
        };
        if query.starts_with(&bytes) && best.map_or(true, |(len, _)| bytes.len() >= len) {
            best = Some((bytes.len(), id));
        }
    }
    best.map(|(_, id)| id)
}

/// Suffix array by comparison sort over the sentinel-aware order.
pub fn naive_suffix_array(corpus: &Corpus) -> Vec<Offset> {
    let mut sa: Vec<Offset> = (0..corpus.len() as Offset).collect();
    sa.sort_by(|&a, &b| corpus.suffix(a).cmp(corpus.suffix(b)));
    sa
}

/// LCP by direct comparison of neighbours.
pub fn naive_lcp(corpus: &Corpus, sa: &[Offset]) -> Vec<u32> {
    let mut lcp = vec![0; sa.len()];
    for i in 1..sa.len() {
        let prev = corpus.suffix(sa[i - 1]);
        let curr = corpus.suffix(sa[i]);
        lcp[i] = prev.iter().zip(curr).take_while(|(a, b)| a == b).count() as u32;
    }
    lcp
}

/// Indexes of `(start, end)` intervals with a non-empty intersection with `[start, end)`, sorted.
pub fn brute_force_overlaps(intervals: &[(u64, u64)], start: u64, end: u64) -> Vec<usize> {
    intervals
        .iter()
        .enumerate()
        .filter(|(_, &(s, e))| s < e && start < end && s < end && start < e)
        .map(|(i, _)| i)
        .collect()
}

/// Every substring-capable backend configuration.
pub fn substring_backends() -> Vec<Backend> {
    vec![
        Backend::SuffixArray(SuffixArrayOptions { compute_lcp: true }),
        Backend::SuffixArray(SuffixArrayOptions { compute_lcp: false }),
        Backend::RadixTree(RadixTreeOptions {
            mode: RadixMode::Suffix,
        }),
    ]
}

/// Build every substring-capable backend over one shared corpus.
pub fn build_all<S: AsRef<[u8]> + Sync>(strings: &[S]) -> Vec<Box<dyn Haystack>> {
    let corpus = match Corpus::build(strings) {
        Ok(corpus) => Arc::new(corpus),
        Err(err) => panic!("test corpus rejected: {}", err),
    };
    substring_backends()
        .iter()
        .map(|backend| match build_haystack(Arc::clone(&corpus), backend) {
            Ok(haystack) => haystack,
            Err(err) => panic!("{:?} failed to build: {}", backend, err),
        })
        .collect()
}
