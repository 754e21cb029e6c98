// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy for builds and queries.
//!
//! Three kinds, and only three:
//!
//! - [`HaystackError::InvalidInput`]: the source strings can't form a corpus. Raised at
//!   build time; nothing partial is produced.
//! - [`HaystackError::InvalidQuery`]: a single query is malformed. The index it was run
//!   against is untouched and stays valid.
//! - [`HaystackError::CapacityExceeded`]: the corpus doesn't fit the offset or sentinel
//!   space. Fatal to that build attempt.
//!
//! "Not found" is never an error. `contains` says `false`, enumerations come back empty.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, HaystackError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HaystackError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("invalid query: {0}")]
    InvalidQuery(#[from] QueryError),

    #[error("capacity exceeded: {what} needs {requested}, limit is {limit}")]
    CapacityExceeded {
        what: &'static str,
        requested: u64,
        limit: u64,
    },
}

impl HaystackError {
    pub(crate) fn capacity(what: &'static str, requested: usize, limit: u64) -> Self {
        HaystackError::CapacityExceeded {
            what,
            requested: requested as u64,
            limit,
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, HaystackError::InvalidInput(_))
    }

    pub fn is_invalid_query(&self) -> bool {
        matches!(self, HaystackError::InvalidQuery(_))
    }

    pub fn is_capacity_exceeded(&self) -> bool {
        matches!(self, HaystackError::CapacityExceeded { .. })
    }
}

/// Why a set of source strings was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("the collection contains no strings")]
    EmptyCollection,

    #[error("string {index} is empty")]
    EmptyString { index: usize },

    #[error("string {index} contains the reserved terminator byte {byte:#04x} at position {position}")]
    ReservedByte {
        index: usize,
        position: usize,
        byte: u8,
    },
}

/// Why a single query was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("pattern contains the reserved terminator byte {byte:#04x} at position {position}")]
    ReservedByte { position: usize, byte: u8 },

    #[error("range start {start} is greater than range end {end}")]
    InvertedRange { start: u64, end: u64 },

    #[error("substring enumeration requires a suffix-mode radix tree")]
    SubstringUnsupported,
}
