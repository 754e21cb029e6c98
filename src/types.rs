// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks shared by every haystack.
//!
//! | Type          | Meaning                                                    |
//! |---------------|------------------------------------------------------------|
//! | `Symbol`      | One corpus element: a byte (`0..=255`) or a sentinel       |
//! | `Offset`      | Position in the concatenated corpus                        |
//! | `StringId`    | Insertion index of a source string                         |
//! | `Occurrence`  | A match in original-string coordinates                     |
//! | `MatchRange`  | Half-open interval over a suffix array or leaf list        |
//!
//! # Invariants
//!
//! - Sentinels are `FIRST_SENTINEL + string_id`: unique per string, greater than every
//!   data symbol, ordered by insertion.
//! - Every offset stored anywhere is `< corpus.len() <= MAX_OFFSET + 1`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// One corpus symbol. Bytes map to themselves; sentinels start at [`FIRST_SENTINEL`].
pub type Symbol = u32;

/// A position in the concatenated corpus.
pub type Offset = u32;

/// The first sentinel value. Sentinel of string `i` is `FIRST_SENTINEL + i`.
pub const FIRST_SENTINEL: Symbol = 256;

/// Largest addressable corpus offset.
pub const MAX_OFFSET: Offset = Offset::MAX;

/// Most strings a corpus can hold: one sentinel each, all above the byte range.
pub const MAX_STRINGS: usize = (Symbol::MAX - FIRST_SENTINEL) as usize;

/// Type-safe string identifier (insertion index into the corpus).
///
/// Keeps a string index from being passed where a corpus offset is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct StringId(pub u32);

impl StringId {
    /// Get the underlying value.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Convert to usize for array indexing.
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// The sentinel symbol terminating this string.
    #[inline]
    pub fn sentinel(self) -> Symbol {
        FIRST_SENTINEL + self.0
    }
}

impl From<u32> for StringId {
    fn from(id: u32) -> Self {
        StringId(id)
    }
}

impl fmt::Display for StringId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single match, in the coordinates of the string it was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Occurrence {
    pub string_id: StringId,
    /// Byte offset within the (normalized) string.
    pub offset: u32,
}

impl Occurrence {
    pub fn new(string_id: StringId, offset: u32) -> Self {
        Self { string_id, offset }
    }
}

/// All entries sharing a queried prefix: `[lo, hi)` over a suffix array or leaf list.
///
/// Empty when `lo == hi`; the position still marks where the pattern would sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchRange {
    pub lo: usize,
    pub hi: usize,
}

impl MatchRange {
    pub fn new(lo: usize, hi: usize) -> Self {
        debug_assert!(lo <= hi, "MatchRange lo {} > hi {}", lo, hi);
        Self { lo, hi }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.hi - self.lo
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lo == self.hi
    }

    #[inline]
    pub fn as_range(&self) -> Range<usize> {
        self.lo..self.hi
    }
}
