// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Rebuild-and-swap handle for a live haystack.
//!
//! Indexes are immutable, so "updating" one means building a new one and swapping it
//! in. Readers take an `Arc` snapshot and query it without holding any lock; a swap
//! only replaces the pointer. Snapshots taken before a swap keep answering against
//! the old index until they are dropped.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::Result;

#[derive(Debug)]
struct Slot<H: ?Sized> {
    haystack: Arc<H>,
    generation: u64,
}

/// A swappable, generation-counted haystack shared between readers and a rebuilder.
#[derive(Debug)]
pub struct SharedHaystack<H: ?Sized> {
    slot: RwLock<Slot<H>>,
}

impl<H> SharedHaystack<H> {
    pub fn new(haystack: H) -> Self {
        Self::from_arc(Arc::new(haystack))
    }
}

impl<H: ?Sized> SharedHaystack<H> {
    /// Start at generation 0 with an existing snapshot.
    pub fn from_arc(haystack: Arc<H>) -> Self {
        Self {
            slot: RwLock::new(Slot {
                haystack,
                generation: 0,
            }),
        }
    }

    /// The current snapshot.
    pub fn load(&self) -> Arc<H> {
        Arc::clone(&self.slot.read().haystack)
    }

    /// The current snapshot and the generation it belongs to.
    pub fn load_with_generation(&self) -> (Arc<H>, u64) {
        let slot = self.slot.read();
        (Arc::clone(&slot.haystack), slot.generation)
    }

    /// Number of swaps so far.
    pub fn generation(&self) -> u64 {
        self.slot.read().generation
    }

    /// Install `haystack`, returning the previous snapshot.
    pub fn swap(&self, haystack: Arc<H>) -> Arc<H> {
        let mut slot = self.slot.write();
        slot.generation += 1;
        log::debug!("haystack swapped: generation {}", slot.generation);
        std::mem::replace(&mut slot.haystack, haystack)
    }

    /// Build a replacement from the current snapshot and swap it in.
    ///
    /// The build runs without holding the lock, so readers are never blocked by it.
    /// If another swap lands first the result is still installed on top of it.
    /// On error the current snapshot stays in place. Returns the new generation.
    pub fn rebuild<F>(&self, build: F) -> Result<u64>
    where
        F: FnOnce(&H) -> Result<Arc<H>>,
    {
        let current = self.load();
        let next = build(current.as_ref())?;
        let mut slot = self.slot.write();
        slot.haystack = next;
        slot.generation += 1;
        log::debug!("haystack rebuilt: generation {}", slot.generation);
        Ok(slot.generation)
    }
}
