// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Items keyed by byte strings.
//!
//! Each key becomes one corpus string; item `i` belongs to string `i`. Three lookups:
//!
//! - [`HaystackMap::get_matching`]: every item whose key contains the pattern
//! - [`HaystackMap::get_prefixed`]: every item whose key starts with the prefix
//! - [`HaystackMap::get_longest_prefix`]: the item whose key is the longest prefix of
//!   the query (routing-table style)
//!
//! Substring lookups run on the selected [`Backend`]; prefix lookups always use a
//! whole-string radix tree over the same corpus.

use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::corpus::Corpus;
use crate::error::Result;
use crate::haystack::{build_haystack, Backend, Haystack};
use crate::radix::{RadixMode, RadixTreeIndex, RadixTreeOptions};
use crate::types::StringId;

/// A key → item collection searchable by substring and by prefix.
pub struct HaystackMap<V> {
    items: Vec<V>,
    haystack: Box<dyn Haystack>,
    keys: RadixTreeIndex,
}

impl<V> HaystackMap<V> {
    /// Build from `(key, item)` pairs with the default alphabet and backend.
    pub fn from_pairs<I, K>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<[u8]> + Sync,
    {
        Self::build(pairs, &Alphabet::default(), &Backend::default())
    }

    pub fn build<I, K>(pairs: I, alphabet: &Alphabet, backend: &Backend) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<[u8]> + Sync,
    {
        let (keys, items): (Vec<K>, Vec<V>) = pairs.into_iter().unzip();
        let corpus = Arc::new(Corpus::build_with(&keys, alphabet)?);
        let haystack = build_haystack(Arc::clone(&corpus), backend)?;
        let keys = RadixTreeIndex::build(
            corpus,
            &RadixTreeOptions {
                mode: RadixMode::WholeString,
            },
        )?;

        log::debug!("haystack map built: {} items", items.len());
        Ok(Self {
            items,
            haystack,
            keys,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: StringId) -> Option<&V> {
        self.items.get(id.as_usize())
    }

    /// The normalized key of item `id`.
    pub fn key(&self, id: StringId) -> Option<Vec<u8>> {
        self.haystack.corpus().string_bytes(id)
    }

    pub fn haystack(&self) -> &dyn Haystack {
        self.haystack.as_ref()
    }

    /// Items whose key contains `pattern`, each once, in insertion order.
    ///
    /// Fails with `InvalidQuery` on a whole-string backend.
    pub fn get_matching(&self, pattern: &[u8]) -> Result<Vec<(StringId, &V)>> {
        let mut ids: Vec<StringId> = self
            .haystack
            .enumerate_substring(pattern)?
            .map(|occurrence| occurrence.string_id)
            .collect();
        Ok(self.resolve(&mut ids))
    }

    /// Items whose key starts with `prefix`, in insertion order.
    pub fn get_prefixed(&self, prefix: &[u8]) -> Result<Vec<(StringId, &V)>> {
        let mut ids: Vec<StringId> = self
            .keys
            .enumerate_prefix(prefix)?
            .map(|occurrence| occurrence.string_id)
            .collect();
        Ok(self.resolve(&mut ids))
    }

    /// The item whose key is the longest prefix of `query`.
    ///
    /// A repeated key resolves to its latest item, so re-inserting a key replaces it.
    pub fn get_longest_prefix(&self, query: &[u8]) -> Result<Option<(StringId, &V)>> {
        Ok(self
            .keys
            .longest_prefix(query)?
            .and_then(|id| Some((id, self.get(id)?))))
    }

    fn resolve(&self, ids: &mut Vec<StringId>) -> Vec<(StringId, &V)> {
        ids.sort_unstable();
        ids.dedup();
        ids.iter()
            .filter_map(|&id| Some((id, self.get(id)?)))
            .collect()
    }
}

impl<V: std::fmt::Debug> std::fmt::Debug for HaystackMap<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HaystackMap")
            .field("items", &self.items)
            .field("strings", &self.haystack.corpus().string_count())
            .finish()
    }
}
