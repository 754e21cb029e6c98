// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! SA-IS: Suffix Array by Induced Sorting, plus Kasai LCP.
//!
//! Linear-time O(n) suffix array construction over the corpus symbol alphabet.
//!
//! # Algorithm Overview
//!
//! ```text
//! Corpus: "ba" + $0      ($0 = 256, maximal)
//!
//! Step 0: Shift every symbol up by one and append a virtual terminal 0
//! ┌─────┬─────┬─────┬───┐
//! │  99 │  98 │ 257 │ 0 │
//! ├─────┼─────┼─────┼───┤
//! │  L  │  S  │  L  │ S │   (S = smaller than next, L = larger)
//! └─────┴─────┴─────┴───┘
//!
//! Step 1: LMS (Leftmost S-type) = S-type preceded by L-type: positions 1, 3
//! Step 2: Place LMS at bucket tails, induce L (left-to-right), induce S (right-to-left)
//! Step 3: Name LMS substrings; recurse on the names if any two are equal
//! Step 4: Induce the final order from the sorted LMS suffixes
//! Step 5: Drop the virtual terminal (it always sorts first)
//!
//! Output: [1, 0, 2]   ("a$0" < "ba$0" < "$0")
//! ```
//!
//! The per-string sentinels are *maximal*, so the suffixes that consist of a sentinel
//! alone sort after every data suffix: `sa[data_len..]` is exactly the sentinel
//! positions, in string order.
//!
//! # Complexity
//!
//! - Time: O(n)
//! - Space: O(n); recursion depth O(log n) since each level at least halves the input
//!
//! # References
//!
//! - Nong, Zhang, Chan (2009): "Linear Suffix Array Construction by Almost Pure Induced-Sorting"
//! - Kasai et al. (2001): "Linear-Time Longest-Common-Prefix Computation in Suffix Arrays"

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::corpus::Corpus;
use crate::error::{HaystackError, Result};
use crate::types::{Offset, Symbol, MAX_OFFSET};

/// Suffix type classification.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum SuffixType {
    /// S-type: suffix is lexicographically smaller than the next suffix
    S,
    /// L-type: suffix is lexicographically larger than the next suffix
    L,
}

/// Unfilled slot marker.
const EMPTY: usize = usize::MAX;

/// Options for [`SuffixArray::build`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuffixArrayOptions {
    /// Compute the LCP array (needed for accelerated search and suffix-tree building).
    pub compute_lcp: bool,
}

impl Default for SuffixArrayOptions {
    fn default() -> Self {
        Self { compute_lcp: true }
    }
}

/// Builder output: the sorted suffixes of a corpus and, optionally, their LCP array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixArray {
    sa: Vec<Offset>,
    lcp: Option<Vec<u32>>,
}

impl SuffixArray {
    /// Build the suffix array of every corpus position, sentinels included.
    pub fn build(corpus: &Corpus, options: &SuffixArrayOptions) -> Result<Self> {
        let started = Instant::now();
        let sa = suffix_array(corpus.symbols(), corpus.alphabet_size())?;
        let lcp = options.compute_lcp.then(|| kasai(corpus.symbols(), &sa));

        log::debug!(
            "suffix array built: {} suffixes, lcp={}, {:?}",
            sa.len(),
            lcp.is_some(),
            started.elapsed()
        );
        Ok(Self { sa, lcp })
    }

    #[inline]
    pub fn as_slice(&self) -> &[Offset] {
        &self.sa
    }

    #[inline]
    pub fn lcp(&self) -> Option<&[u32]> {
        self.lcp.as_deref()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sa.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sa.is_empty()
    }

    pub fn into_parts(self) -> (Vec<Offset>, Option<Vec<u32>>) {
        (self.sa, self.lcp)
    }
}

/// Suffix array of `symbols`, where every symbol is `< alphabet_size`.
///
/// Sorting treats the text as one string; callers guarantee every string ends in a
/// unique sentinel, which makes that order equal to the per-string suffix order.
pub fn suffix_array(symbols: &[Symbol], alphabet_size: usize) -> Result<Vec<Offset>> {
    let n = symbols.len();
    if n > MAX_OFFSET as usize {
        return Err(HaystackError::capacity(
            "suffix array length",
            n,
            u64::from(MAX_OFFSET),
        ));
    }
    if n == 0 {
        return Ok(Vec::new());
    }

    // Shift up by one so 0 is free for the virtual terminal.
    let mut text: Vec<u32> = Vec::with_capacity(n + 1);
    text.extend(symbols.iter().map(|&s| s + 1));
    text.push(0);

    let sa = sais(&text, alphabet_size + 1, 0);
    debug_assert_eq!(sa[0], n, "virtual terminal must sort first");

    Ok(sa[1..].iter().map(|&pos| pos as Offset).collect())
}

/// Core SA-IS. `text` must end with a unique smallest symbol.
fn sais(text: &[u32], alphabet_size: usize, depth: usize) -> Vec<usize> {
    let n = text.len();
    if n == 1 {
        return vec![0];
    }
    if n == 2 {
        // The last symbol is the unique minimum.
        return vec![1, 0];
    }

    log::trace!("sa-is level {}: n={}, alphabet={}", depth, n, alphabet_size);

    // Step 1: Classify suffixes and find LMS positions
    let types = classify_suffixes(text);
    let lms_positions: Vec<usize> = (1..n).filter(|&i| is_lms(&types, i)).collect();

    // Step 2: First induced sort to order the LMS substrings
    let bucket_sizes = compute_bucket_sizes(text, alphabet_size);
    let mut sa = vec![EMPTY; n];
    induce(text, &types, &bucket_sizes, &lms_positions, &mut sa);

    // Step 3: Name LMS substrings
    let mut name = 0usize;
    let mut prev_pos: Option<usize> = None;
    let mut lms_names = vec![EMPTY; n];

    for &pos in &sa {
        if pos == EMPTY || !is_lms(&types, pos) {
            continue;
        }
        if let Some(prev) = prev_pos {
            if !lms_substrings_equal(text, &types, prev, pos) {
                name += 1;
            }
        }
        lms_names[pos] = name;
        prev_pos = Some(pos);
    }

    let unique_count = name + 1;
    let reduced: Vec<u32> = lms_positions
        .iter()
        .map(|&pos| lms_names[pos] as u32)
        .collect();

    // Step 4: Recurse only if some LMS substrings share a name
    let sorted_lms_indices = if unique_count < lms_positions.len() {
        sais(&reduced, unique_count, depth + 1)
    } else {
        // All unique: the names are already ranks
        let mut order = vec![0usize; reduced.len()];
        for (i, &rank) in reduced.iter().enumerate() {
            order[rank as usize] = i;
        }
        order
    };

    let sorted_lms: Vec<usize> = sorted_lms_indices
        .iter()
        .map(|&i| lms_positions[i])
        .collect();

    // Step 5: Final induced sort with correctly ordered LMS suffixes
    sa.fill(EMPTY);
    induce(text, &types, &bucket_sizes, &sorted_lms, &mut sa);

    sa
}

/// Place `lms` (in the order given) at bucket tails, then induce L and S types.
fn induce(
    text: &[u32],
    types: &[SuffixType],
    bucket_sizes: &[usize],
    lms: &[usize],
    sa: &mut [usize],
) {
    let n = text.len();

    let mut tails = compute_bucket_tails(bucket_sizes);
    for &pos in lms.iter().rev() {
        let c = text[pos] as usize;
        tails[c] -= 1;
        sa[tails[c]] = pos;
    }

    // Induce L-type
    let mut heads = compute_bucket_heads(bucket_sizes);
    for i in 0..n {
        if sa[i] == EMPTY || sa[i] == 0 {
            continue;
        }
        let j = sa[i] - 1;
        if types[j] == SuffixType::L {
            let c = text[j] as usize;
            sa[heads[c]] = j;
            heads[c] += 1;
        }
    }

    // Induce S-type
    let mut tails = compute_bucket_tails(bucket_sizes);
    for i in (0..n).rev() {
        if sa[i] == EMPTY || sa[i] == 0 {
            continue;
        }
        let j = sa[i] - 1;
        if types[j] == SuffixType::S {
            let c = text[j] as usize;
            tails[c] -= 1;
            sa[tails[c]] = j;
        }
    }
}

/// Classify each suffix as S-type or L-type, right to left.
fn classify_suffixes(text: &[u32]) -> Vec<SuffixType> {
    let n = text.len();
    let mut types = vec![SuffixType::S; n];

    // Last position is always S-type (terminal)
    for i in (0..n - 1).rev() {
        types[i] = if text[i] > text[i + 1] {
            SuffixType::L
        } else if text[i] < text[i + 1] {
            SuffixType::S
        } else {
            types[i + 1]
        };
    }

    types
}

/// Check if position i is an LMS position.
#[inline]
fn is_lms(types: &[SuffixType], i: usize) -> bool {
    i > 0 && types[i] == SuffixType::S && types[i - 1] == SuffixType::L
}

fn compute_bucket_sizes(text: &[u32], alphabet_size: usize) -> Vec<usize> {
    let mut sizes = vec![0; alphabet_size];
    for &c in text {
        sizes[c as usize] += 1;
    }
    sizes
}

/// Compute bucket head positions.
fn compute_bucket_heads(sizes: &[usize]) -> Vec<usize> {
    let mut heads = vec![0; sizes.len()];
    let mut sum = 0;
    for (i, &size) in sizes.iter().enumerate() {
        heads[i] = sum;
        sum += size;
    }
    heads
}

/// Compute bucket tail positions (one past the last slot).
fn compute_bucket_tails(sizes: &[usize]) -> Vec<usize> {
    let mut tails = vec![0; sizes.len()];
    let mut sum = 0;
    for (i, &size) in sizes.iter().enumerate() {
        sum += size;
        tails[i] = sum;
    }
    tails
}

/// Compare two LMS substrings for equality (symbols and types, up to the next LMS).
fn lms_substrings_equal(text: &[u32], types: &[SuffixType], i: usize, j: usize) -> bool {
    if i == j {
        return true;
    }

    let n = text.len();
    let mut k = 0;

    loop {
        let pi = i + k;
        let pj = j + k;

        if pi >= n || pj >= n {
            return pi >= n && pj >= n;
        }

        if text[pi] != text[pj] || types[pi] != types[pj] {
            return false;
        }

        if k > 0 {
            let lms_i = is_lms(types, pi);
            let lms_j = is_lms(types, pj);
            if lms_i && lms_j {
                return true;
            }
            if lms_i != lms_j {
                return false;
            }
        }

        k += 1;
    }
}

/// Kasai's LCP: `lcp[r]` = common prefix of suffixes `sa[r - 1]` and `sa[r]`, `lcp[0] = 0`.
///
/// Walks suffixes in text order carrying `h`: if suffix `p` shares `h` symbols with its
/// predecessor in `sa`, suffix `p + 1` shares at least `h - 1` with its own.
pub fn kasai(text: &[Symbol], sa: &[Offset]) -> Vec<u32> {
    let n = sa.len();
    let mut rank = vec![0usize; n];
    for (r, &pos) in sa.iter().enumerate() {
        rank[pos as usize] = r;
    }

    let mut lcp = vec![0u32; n];
    let mut h = 0usize;
    for p in 0..n {
        let r = rank[p];
        if r == 0 {
            h = 0;
            continue;
        }
        let q = sa[r - 1] as usize;
        while p + h < n && q + h < n && text[p + h] == text[q + h] {
            h += 1;
        }
        lcp[r] = h as u32;
        h = h.saturating_sub(1);
    }
    lcp
}
