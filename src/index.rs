// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Generalized suffix array index.
//!
//! Every query reduces to one question: which contiguous block of the suffix array
//! starts with the pattern? Two binary searches answer it (first suffix `>= p`, first
//! suffix `> p`, both compared on the first `|p|` symbols).
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **SUFFIX_ARRAY_SORTED**: `suffix(sa[i]) <= suffix(sa[i + 1])` under the
//!    sentinel-aware order
//! 2. **SUFFIX_ARRAY_COMPLETE**: `sa` is a permutation of `[0, corpus.len())`
//! 3. **DATA_PREFIX**: `sa[..data_len]` are the data suffixes; the sentinel-only
//!    suffixes follow, because sentinels are maximal
//! 4. **LCP_CORRECT**: `lcp[i]` = common prefix length of `suffix(sa[i - 1])` and
//!    `suffix(sa[i])`, `lcp[0] = 0`
//!
//! # LCP-accelerated search
//!
//! With an LCP array the search carries `l = lcp(p, suffix(left))` and
//! `r = lcp(p, suffix(right))` and precomputes, for every midpoint the search can
//! visit, `llcp[mid] = lcp(suffix(left), suffix(mid))` and `rlcp[mid]` likewise. A
//! probe that can be decided from those numbers skips symbol comparison entirely;
//! otherwise comparison resumes at `max(l, r)`. No pattern symbol is compared twice
//! across the search, giving O(m + log n).

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Instant;

use crate::corpus::Corpus;
use crate::error::Result;
use crate::haystack::{Haystack, Occurrences};
use crate::sais::{SuffixArray, SuffixArrayOptions};
use crate::types::{MatchRange, Offset, Symbol};

#[cfg(debug_assertions)]
use crate::contracts;

/// Haystack backed by a generalized suffix array.
#[derive(Debug, Clone)]
pub struct SuffixArrayIndex {
    corpus: Arc<Corpus>,
    suffix_array: Vec<Offset>,
    lcp: Option<Vec<u32>>,
    /// `lcp(suffix(left), suffix(mid))` for each search midpoint.
    llcp: Vec<u32>,
    /// `lcp(suffix(mid), suffix(right))` for each search midpoint.
    rlcp: Vec<u32>,
}

impl SuffixArrayIndex {
    /// Build the suffix array (and LCP, if requested) over `corpus`.
    pub fn build(corpus: Arc<Corpus>, options: &SuffixArrayOptions) -> Result<Self> {
        let suffix_array = SuffixArray::build(&corpus, options)?;
        Ok(Self::from_suffix_array(corpus, suffix_array))
    }

    /// Wrap an already-built suffix array. It must have been built over `corpus`.
    pub fn from_suffix_array(corpus: Arc<Corpus>, suffix_array: SuffixArray) -> Self {
        let started = Instant::now();
        let (suffix_array, lcp) = suffix_array.into_parts();

        #[cfg(debug_assertions)]
        {
            contracts::check_suffix_array_complete(&corpus, &suffix_array);
            contracts::check_suffix_array_sorted(&corpus, &suffix_array);
            if let Some(lcp) = &lcp {
                contracts::check_lcp_correct(&corpus, &suffix_array, lcp);
            }
        }

        let (llcp, rlcp) = match &lcp {
            Some(lcp) => search_lcp_tables(lcp, corpus.data_len()),
            None => (Vec::new(), Vec::new()),
        };

        log::debug!(
            "suffix array index ready: {} strings, {} suffixes, {:?}",
            corpus.string_count(),
            suffix_array.len(),
            started.elapsed()
        );

        Self {
            corpus,
            suffix_array,
            lcp,
            llcp,
            rlcp,
        }
    }

    #[inline]
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Shared handle to the corpus, for building a second backend over it.
    pub fn corpus_handle(&self) -> Arc<Corpus> {
        Arc::clone(&self.corpus)
    }

    #[inline]
    pub fn suffix_array(&self) -> &[Offset] {
        &self.suffix_array
    }

    #[inline]
    pub fn lcp(&self) -> Option<&[u32]> {
        self.lcp.as_deref()
    }

    /// The suffix-array interval of suffixes starting with `pattern`.
    ///
    /// The empty pattern matches every data suffix: `[0, data_len)`.
    pub fn match_range(&self, pattern: &[u8]) -> Result<MatchRange> {
        let pattern = self.corpus.encode_pattern(pattern)?;
        let range = self.range_of(&pattern);
        #[cfg(debug_assertions)]
        contracts::check_match_range(range, self.corpus.data_len());
        Ok(range)
    }

    fn range_of(&self, pattern: &[u8]) -> MatchRange {
        let data_len = self.corpus.data_len();
        if pattern.is_empty() {
            return MatchRange::new(0, data_len);
        }
        let searchable = &self.suffix_array[..data_len];

        if self.lcp.is_some() {
            let lo = self.accelerated_bound(pattern, false);
            let hi = self.accelerated_bound(pattern, true);
            return MatchRange::new(lo, hi);
        }

        let symbols = self.corpus.symbols();
        let lo = searchable
            .partition_point(|&pos| compare_from(symbols, pos, pattern, 0).1 == Ordering::Less);
        let hi = searchable
            .partition_point(|&pos| compare_from(symbols, pos, pattern, 0).1 != Ordering::Greater);
        MatchRange::new(lo, hi)
    }

    /// First index whose suffix is `>= pattern` (or `> pattern` when `upper`).
    ///
    /// `left` and `right` start as virtual sentinels one outside the searchable block.
    fn accelerated_bound(&self, pattern: &[u8], upper: bool) -> usize {
        let symbols = self.corpus.symbols();
        let mut left: isize = -1;
        let mut right: isize = self.corpus.data_len() as isize;
        let (mut l, mut r) = (0usize, 0usize);

        while right - left > 1 {
            let mid = ((left + right) / 2) as usize;

            let resume_at = if l >= r {
                let shared = self.llcp[mid] as usize;
                match shared.cmp(&l) {
                    // mid agrees with left past the point where left fell below p
                    Ordering::Greater => {
                        left = mid as isize;
                        continue;
                    }
                    // mid parts from left earlier, and upward
                    Ordering::Less => {
                        right = mid as isize;
                        r = shared;
                        continue;
                    }
                    Ordering::Equal => l,
                }
            } else {
                let shared = self.rlcp[mid] as usize;
                match shared.cmp(&r) {
                    Ordering::Greater => {
                        right = mid as isize;
                        continue;
                    }
                    Ordering::Less => {
                        left = mid as isize;
                        l = shared;
                        continue;
                    }
                    Ordering::Equal => r,
                }
            };

            let (matched, order) = compare_from(symbols, self.suffix_array[mid], pattern, resume_at);
            let mid_is_left = match order {
                Ordering::Less => true,
                Ordering::Equal => upper,
                Ordering::Greater => false,
            };
            if mid_is_left {
                left = mid as isize;
                l = matched;
            } else {
                right = mid as isize;
                r = matched;
            }
        }

        right as usize
    }

    fn occurrences(&self, pattern: &[u8]) -> Result<Occurrences<'_>> {
        let range = self.match_range(pattern)?;
        Ok(Occurrences::new(
            &self.corpus,
            &self.suffix_array[range.as_range()],
        ))
    }
}

impl Haystack for SuffixArrayIndex {
    fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    fn contains(&self, pattern: &[u8]) -> Result<bool> {
        Ok(!self.match_range(pattern)?.is_empty())
    }

    fn count(&self, pattern: &[u8]) -> Result<usize> {
        Ok(self.match_range(pattern)?.len())
    }

    fn locate(&self, pattern: &[u8]) -> Result<Occurrences<'_>> {
        self.occurrences(pattern)
    }

    fn enumerate_prefix(&self, pattern: &[u8]) -> Result<Occurrences<'_>> {
        self.occurrences(pattern)
    }

    fn enumerate_substring(&self, pattern: &[u8]) -> Result<Occurrences<'_>> {
        self.occurrences(pattern)
    }
}

/// Compare the suffix at `pos` against `pattern`, starting at symbol `from`.
///
/// Returns the matched length and the order of the suffix's first `|pattern|` symbols
/// relative to `pattern`. Never reads past the suffix's sentinel: a sentinel can't
/// equal a pattern byte, so the mismatch comes first.
#[inline]
pub(crate) fn compare_from(
    symbols: &[Symbol],
    pos: Offset,
    pattern: &[u8],
    from: usize,
) -> (usize, Ordering) {
    let start = pos as usize;
    for (k, &byte) in pattern.iter().enumerate().skip(from) {
        let symbol = symbols[start + k];
        let byte = Symbol::from(byte);
        if symbol != byte {
            return (k, symbol.cmp(&byte));
        }
    }
    (pattern.len(), Ordering::Equal)
}

/// Precompute `llcp`/`rlcp` for the implicit search tree over `[0, n)`.
fn search_lcp_tables(lcp: &[u32], n: usize) -> (Vec<u32>, Vec<u32>) {
    let mut llcp = vec![0u32; n];
    let mut rlcp = vec![0u32; n];
    fill_search_lcp(lcp, -1, n as isize, n as isize, &mut llcp, &mut rlcp);
    (llcp, rlcp)
}

/// Returns `lcp(suffix(left), suffix(right))`; virtual bounds share nothing.
fn fill_search_lcp(
    lcp: &[u32],
    left: isize,
    right: isize,
    n: isize,
    llcp: &mut [u32],
    rlcp: &mut [u32],
) -> u32 {
    let virtual_bound = left < 0 || right >= n;
    if right - left <= 1 {
        return if virtual_bound { 0 } else { lcp[right as usize] };
    }
    let mid = (left + right) / 2;
    let to_left = fill_search_lcp(lcp, left, mid, n, llcp, rlcp);
    let to_right = fill_search_lcp(lcp, mid, right, n, llcp, rlcp);
    llcp[mid as usize] = to_left;
    rlcp[mid as usize] = to_right;
    if virtual_bound {
        0
    } else {
        to_left.min(to_right)
    }
}

/// Check if a suffix array is sorted under the sentinel-aware order.
pub fn is_suffix_array_sorted(corpus: &Corpus, suffix_array: &[Offset]) -> bool {
    suffix_array
        .windows(2)
        .all(|pair| corpus.suffix(pair[0]) <= corpus.suffix(pair[1]))
}
