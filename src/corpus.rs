// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The concatenated corpus and its string table.
//!
//! ```text
//! strings:  "banana"            "ananas"
//! corpus:   b a n a n a $0      a n a n a s $1
//! offsets:  0 1 2 3 4 5 6       7 8 9 ...  13
//! ```
//!
//! Each string is followed by its own sentinel (`$i = FIRST_SENTINEL + i`). Sentinels
//! are globally unique and only appear at string ends, so no suffix comparison can run
//! from one string into the next.
//!
//! # Invariants
//!
//! - `len() == data_len() + string_count()`
//! - `string_table()` starts are strictly increasing, one entry per string, insertion order
//! - the corpus is immutable once built; indexes share it through `Arc<Corpus>`

use std::borrow::Cow;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::alphabet::Alphabet;
use crate::error::{HaystackError, InputError, Result};
use crate::types::{Offset, StringId, Symbol, FIRST_SENTINEL, MAX_OFFSET, MAX_STRINGS};

/// One row of the string table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringEntry {
    /// Corpus offset of the first byte.
    pub start: Offset,
    /// Length in bytes, sentinel excluded.
    pub len: u32,
    /// Caller-supplied identifier. Defaults to the insertion index.
    pub external_id: u64,
}

impl StringEntry {
    /// Corpus offset of this string's sentinel.
    #[inline]
    pub fn sentinel_offset(&self) -> Offset {
        self.start + self.len
    }
}

/// Maps corpus offsets back to `(string, local offset)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringTable {
    entries: Vec<StringEntry>,
}

impl StringTable {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: StringId) -> Option<&StringEntry> {
        self.entries.get(id.as_usize())
    }

    pub fn entries(&self) -> &[StringEntry] {
        &self.entries
    }

    /// Resolve a corpus offset by binary search over string starts.
    ///
    /// A sentinel offset resolves to its string with local offset `len`.
    pub fn locate(&self, offset: Offset) -> Option<(StringId, u32)> {
        let idx = self.entries.partition_point(|e| e.start <= offset);
        if idx == 0 {
            return None;
        }
        let entry = &self.entries[idx - 1];
        let local = offset - entry.start;
        if local > entry.len {
            return None;
        }
        Some((StringId((idx - 1) as u32), local))
    }

    /// Find the string carrying a caller-supplied id (first match, linear scan).
    pub fn find_external(&self, external_id: u64) -> Option<StringId> {
        self.entries
            .iter()
            .position(|e| e.external_id == external_id)
            .map(|i| StringId(i as u32))
    }
}

/// The immutable symbol buffer every index is built over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    symbols: Vec<Symbol>,
    table: StringTable,
    alphabet: Alphabet,
    data_len: usize,
}

impl Corpus {
    /// Build with the default alphabet (raw bytes, NUL reserved).
    pub fn build<I, S>(strings: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]> + Sync,
    {
        Self::build_with(strings, &Alphabet::default())
    }

    /// Build over a specific alphabet. String ids are insertion indices.
    pub fn build_with<I, S>(strings: I, alphabet: &Alphabet) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]> + Sync,
    {
        let strings: Vec<S> = strings.into_iter().collect();
        let ids: Vec<u64> = (0..strings.len() as u64).collect();
        Self::assemble(&strings, ids, alphabet)
    }

    /// Build from `(external id, bytes)` pairs.
    pub fn build_keyed<I, S>(pairs: I, alphabet: &Alphabet) -> Result<Self>
    where
        I: IntoIterator<Item = (u64, S)>,
        S: AsRef<[u8]> + Sync,
    {
        let (ids, strings): (Vec<u64>, Vec<S>) = pairs.into_iter().unzip();
        Self::assemble(&strings, ids, alphabet)
    }

    fn assemble<S>(strings: &[S], ids: Vec<u64>, alphabet: &Alphabet) -> Result<Self>
    where
        S: AsRef<[u8]> + Sync,
    {
        if strings.is_empty() {
            return Err(InputError::EmptyCollection.into());
        }
        if strings.len() > MAX_STRINGS {
            return Err(HaystackError::capacity(
                "string count",
                strings.len(),
                MAX_STRINGS as u64,
            ));
        }

        let encoded = encode_all(strings, alphabet)?;

        let data_len: usize = encoded.iter().map(|s| s.len()).sum();
        let total = data_len + encoded.len();
        if total > MAX_OFFSET as usize {
            return Err(HaystackError::capacity(
                "corpus length",
                total,
                u64::from(MAX_OFFSET),
            ));
        }

        let mut symbols: Vec<Symbol> = Vec::with_capacity(total);
        let mut entries = Vec::with_capacity(encoded.len());
        for ((i, bytes), external_id) in encoded.iter().enumerate().zip(ids) {
            entries.push(StringEntry {
                start: symbols.len() as Offset,
                len: bytes.len() as u32,
                external_id,
            });
            symbols.extend(bytes.iter().map(|&b| Symbol::from(b)));
            symbols.push(FIRST_SENTINEL + i as Symbol);
        }

        let corpus = Corpus {
            symbols,
            table: StringTable { entries },
            alphabet: *alphabet,
            data_len,
        };
        log::debug!(
            "corpus built: {} strings, {} data bytes",
            corpus.string_count(),
            corpus.data_len
        );
        Ok(corpus)
    }

    /// Corpus length including one sentinel per string.
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false: a corpus holds at least one non-empty string.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Sum of string lengths, sentinels excluded.
    #[inline]
    pub fn data_len(&self) -> usize {
        self.data_len
    }

    #[inline]
    pub fn string_count(&self) -> usize {
        self.table.len()
    }

    /// Bytes plus one sentinel per string.
    #[inline]
    pub fn alphabet_size(&self) -> usize {
        FIRST_SENTINEL as usize + self.string_count()
    }

    #[inline]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    #[inline]
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    #[inline]
    pub fn string_table(&self) -> &StringTable {
        &self.table
    }

    /// Map a corpus offset to `(string, local offset)`.
    #[inline]
    pub fn locate(&self, offset: Offset) -> Option<(StringId, u32)> {
        self.table.locate(offset)
    }

    /// The string's symbols, sentinel excluded.
    pub fn string(&self, id: StringId) -> Option<&[Symbol]> {
        let entry = self.table.get(id)?;
        let start = entry.start as usize;
        Some(&self.symbols[start..start + entry.len as usize])
    }

    /// The string's normalized bytes.
    pub fn string_bytes(&self, id: StringId) -> Option<Vec<u8>> {
        self.string(id)
            .map(|symbols| symbols.iter().map(|&s| s as u8).collect())
    }

    /// Suffix starting at `offset`, running through its string's sentinel.
    pub fn suffix(&self, offset: Offset) -> &[Symbol] {
        match self.table.locate(offset) {
            Some((id, _)) => {
                let end = self.table.entries[id.as_usize()].sentinel_offset() as usize;
                &self.symbols[offset as usize..=end]
            }
            None => &[],
        }
    }

    #[inline]
    pub fn is_sentinel(symbol: Symbol) -> bool {
        symbol >= FIRST_SENTINEL
    }

    /// The string a sentinel terminates.
    #[inline]
    pub fn sentinel_owner(symbol: Symbol) -> Option<StringId> {
        symbol.checked_sub(FIRST_SENTINEL).map(StringId)
    }

    /// Normalize a pattern with this corpus' alphabet and reject reserved bytes.
    pub fn encode_pattern<'a>(&self, pattern: &'a [u8]) -> Result<Cow<'a, [u8]>> {
        self.alphabet.encode_pattern(pattern)
    }
}

fn encode_all<'a, S>(strings: &'a [S], alphabet: &Alphabet) -> Result<Vec<Cow<'a, [u8]>>>
where
    S: AsRef<[u8]> + Sync,
{
    // Collect every outcome first so the reported error is always the lowest index.
    #[cfg(feature = "parallel")]
    let outcomes: Vec<Result<Cow<'a, [u8]>>> = strings
        .par_iter()
        .enumerate()
        .map(|(i, s)| alphabet.encode_string(i, s.as_ref()))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<Result<Cow<'a, [u8]>>> = strings
        .iter()
        .enumerate()
        .map(|(i, s)| alphabet.encode_string(i, s.as_ref()))
        .collect();

    outcomes.into_iter().collect()
}
