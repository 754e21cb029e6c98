// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The query contract every backend implements.
//!
//! Callers program against `dyn Haystack`; the concrete backend is picked once, at
//! construction, through [`Backend`]. Two backends answer every query with the same
//! result *set*. They differ in complexity and in enumeration order, so treat
//! enumerations as unordered unless you ask for [`Haystack::locate_sorted`].
//!
//! | Operation             | Suffix array          | Radix tree (suffix mode) |
//! |-----------------------|-----------------------|--------------------------|
//! | `contains` / `count`  | O(m log n)            | O(m)                     |
//! | `locate`              | O(m log n + occ)      | O(m + occ)               |
//! | `enumerate_substring` | same as `locate`      | same as `locate`         |
//!
//! A whole-string radix tree answers prefix queries over whole strings only; it rejects
//! `enumerate_substring`.

use std::iter::FusedIterator;
use std::slice;
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::corpus::Corpus;
use crate::error::Result;
use crate::index::SuffixArrayIndex;
use crate::radix::{RadixTreeIndex, RadixTreeOptions};
use crate::sais::SuffixArrayOptions;
use crate::types::{Occurrence, Offset};

/// A searchable collection of strings.
///
/// Every method is a pure read over immutable structures, so a built haystack can be
/// shared across threads without locking.
pub trait Haystack: Send + Sync {
    /// The corpus this haystack was built over.
    fn corpus(&self) -> &Corpus;

    /// Does `pattern` occur anywhere?
    fn contains(&self, pattern: &[u8]) -> Result<bool>;

    /// Number of occurrences of `pattern`, without enumerating them.
    fn count(&self, pattern: &[u8]) -> Result<usize>;

    /// Every occurrence of `pattern`, lazily, in backend order.
    fn locate(&self, pattern: &[u8]) -> Result<Occurrences<'_>>;

    /// Occurrences whose indexed suffix (or whole string) starts with `pattern`.
    fn enumerate_prefix(&self, pattern: &[u8]) -> Result<Occurrences<'_>>;

    /// Occurrences of `pattern` anywhere inside a string.
    fn enumerate_substring(&self, pattern: &[u8]) -> Result<Occurrences<'_>>;

    /// Stable-order variant of [`locate`](Haystack::locate): sorted by `(string, offset)`.
    fn locate_sorted(&self, pattern: &[u8]) -> Result<Vec<Occurrence>> {
        Ok(sort_occurrences(self.locate(pattern)?.collect()))
    }
}

/// Sort occurrences by `(string id, offset)`.
pub fn sort_occurrences(mut occurrences: Vec<Occurrence>) -> Vec<Occurrence> {
    #[cfg(feature = "parallel")]
    occurrences.par_sort_unstable();
    #[cfg(not(feature = "parallel"))]
    occurrences.sort_unstable();
    occurrences
}

/// Lazy occurrence sequence over a slice of corpus offsets.
///
/// Borrows the index it came from, so it can't outlive it. Cloning gives an
/// independent cursor over the same matches.
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    corpus: &'a Corpus,
    offsets: slice::Iter<'a, Offset>,
}

impl<'a> Occurrences<'a> {
    pub(crate) fn new(corpus: &'a Corpus, offsets: &'a [Offset]) -> Self {
        Self {
            corpus,
            offsets: offsets.iter(),
        }
    }

    /// The raw corpus offsets still to be yielded.
    pub fn offsets(&self) -> &'a [Offset] {
        self.offsets.as_slice()
    }

    fn resolve(&self, offset: Offset) -> Occurrence {
        // Offsets come from the index built over this corpus, so they always resolve.
        let (string_id, local) = self
            .corpus
            .locate(offset)
            .unwrap_or_else(|| panic!("offset {} outside corpus", offset));
        Occurrence::new(string_id, local)
    }
}

impl Iterator for Occurrences<'_> {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Occurrence> {
        let offset = *self.offsets.next()?;
        Some(self.resolve(offset))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.offsets.size_hint()
    }
}

impl DoubleEndedIterator for Occurrences<'_> {
    fn next_back(&mut self) -> Option<Occurrence> {
        let offset = *self.offsets.next_back()?;
        Some(self.resolve(offset))
    }
}

impl ExactSizeIterator for Occurrences<'_> {}

impl FusedIterator for Occurrences<'_> {}

/// Which backend to build, with its options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum Backend {
    SuffixArray(SuffixArrayOptions),
    RadixTree(RadixTreeOptions),
}

impl Default for Backend {
    fn default() -> Self {
        Backend::SuffixArray(SuffixArrayOptions::default())
    }
}

/// Build the selected backend over `corpus`.
pub fn build_haystack(corpus: Arc<Corpus>, backend: &Backend) -> Result<Box<dyn Haystack>> {
    Ok(match backend {
        Backend::SuffixArray(options) => Box::new(SuffixArrayIndex::build(corpus, options)?),
        Backend::RadixTree(options) => Box::new(RadixTreeIndex::build(corpus, options)?),
    })
}
