// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Full-text search core over a fixed collection of byte strings.
//!
//! Build a [`Corpus`] once, index it with one of two backends, and ask substring
//! questions: does `p` occur, how often, and where.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌────────────────────┐
//! │ alphabet.rs │────▶│  corpus.rs   │────▶│      sais.rs       │
//! │ (normalize, │     │ (symbols +   │     │ (SA-IS, Kasai LCP) │
//! │ terminator) │     │ StringTable) │     └─────────┬──────────┘
//! └─────────────┘     └──────────────┘               │
//!                                          ┌─────────┴──────────┐
//!                                          ▼                    ▼
//!                                 ┌────────────────┐   ┌────────────────┐
//!                                 │    index.rs    │   │    radix.rs    │
//!                                 │ SuffixArray-   │   │ RadixTree-     │
//!                                 │ Index          │   │ Index          │
//!                                 └───────┬────────┘   └───────┬────────┘
//!                                         └─────────┬──────────┘
//!                                                   ▼
//!                                  ┌──────────────────────────────────┐
//!                                  │ haystack.rs  (trait Haystack)    │
//!                                  │ map.rs / shared.rs / interval.rs │
//!                                  └──────────────────────────────────┘
//! ```
//!
//! # Sentinels
//!
//! The corpus is every string followed by its own sentinel symbol. Sentinels sit
//! above the byte range (`256 + string id`), so they are unique and sort after every
//! byte. Externally one reserved byte (NUL by default) stands for "a sentinel": it
//! can't appear in source strings or patterns.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use haystack::{build_haystack, Backend, Corpus};
//!
//! let corpus = Arc::new(Corpus::build(["banana", "ananas"])?);
//! let haystack = build_haystack(corpus, &Backend::default())?;
//!
//! assert_eq!(haystack.count(b"ana")?, 4);
//! assert!(!haystack.contains(b"xyz")?);
//! # Ok::<(), haystack::HaystackError>(())
//! ```

pub mod contracts;
pub mod testing;

mod alphabet;
mod corpus;
mod error;
mod haystack;
mod index;
mod interval;
mod map;
mod radix;
mod sais;
mod shared;
mod types;

pub use alphabet::{Alphabet, Normalization, DEFAULT_TERMINATOR};
pub use corpus::{Corpus, StringEntry, StringTable};
pub use error::{HaystackError, InputError, QueryError, Result};
pub use haystack::{build_haystack, sort_occurrences, Backend, Haystack, Occurrences};
pub use index::{is_suffix_array_sorted, SuffixArrayIndex};
pub use interval::{Interval, IntervalTree, Iter as IntervalIter, Overlaps, StringRegions};
pub use map::HaystackMap;
pub use radix::{RadixMode, RadixTreeIndex, RadixTreeOptions};
pub use sais::{kasai, suffix_array, SuffixArray, SuffixArrayOptions};
pub use shared::SharedHaystack;
pub use types::{
    MatchRange, Occurrence, Offset, StringId, Symbol, FIRST_SENTINEL, MAX_OFFSET, MAX_STRINGS,
};
