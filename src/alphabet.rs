// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Byte normalization and the reserved terminator byte.
//!
//! The corpus alphabet is bytes `0..=255` plus one sentinel per string. Sentinels live
//! above the byte range, so no byte can collide with one internally. Externally,
//! though, callers need a way to spell "a sentinel" and we need a way to refuse it:
//! the alphabet reserves a single **terminator byte** (NUL by default). Source strings
//! containing it are rejected at build time, patterns containing it at query time.
//!
//! Normalization runs on both sides, so a case-folded corpus answers case-folded
//! queries. Offsets always refer to the normalized bytes.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

use crate::error::{InputError, QueryError, Result};

/// Default reserved byte.
pub const DEFAULT_TERMINATOR: u8 = 0x00;

/// How source strings and patterns are normalized before indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// Bytes are indexed as given.
    #[default]
    None,
    /// ASCII letters are lowercased; every other byte is untouched. Offsets are preserved.
    AsciiCaseFold,
    /// NFD, strip combining marks, lowercase. Offsets refer to the normalized UTF-8.
    /// Invalid UTF-8 falls back to ASCII case folding.
    Unicode,
}

/// The fixed alphabet a corpus is built over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Alphabet {
    pub terminator: u8,
    pub normalization: Normalization,
}

impl Default for Alphabet {
    fn default() -> Self {
        Self {
            terminator: DEFAULT_TERMINATOR,
            normalization: Normalization::None,
        }
    }
}

impl Alphabet {
    pub fn new(terminator: u8, normalization: Normalization) -> Self {
        Self {
            terminator,
            normalization,
        }
    }

    /// Same alphabet with a different reserved byte.
    pub fn with_terminator(mut self, terminator: u8) -> Self {
        self.terminator = terminator;
        self
    }

    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Apply this alphabet's normalization. Borrows when nothing changes.
    pub fn normalize<'a>(&self, bytes: &'a [u8]) -> Cow<'a, [u8]> {
        match self.normalization {
            Normalization::None => Cow::Borrowed(bytes),
            Normalization::AsciiCaseFold => fold_ascii(bytes),
            Normalization::Unicode => match std::str::from_utf8(bytes) {
                Ok(text) => {
                    let normalized = normalize_unicode(text);
                    if normalized.as_bytes() == bytes {
                        Cow::Borrowed(bytes)
                    } else {
                        Cow::Owned(normalized.into_bytes())
                    }
                }
                Err(_) => fold_ascii(bytes),
            },
        }
    }

    /// Normalize and validate the `index`-th source string.
    pub fn encode_string<'a>(&self, index: usize, bytes: &'a [u8]) -> Result<Cow<'a, [u8]>> {
        let normalized = self.normalize(bytes);
        if normalized.is_empty() {
            return Err(InputError::EmptyString { index }.into());
        }
        if let Some(position) = self.find_terminator(&normalized) {
            return Err(InputError::ReservedByte {
                index,
                position,
                byte: self.terminator,
            }
            .into());
        }
        Ok(normalized)
    }

    /// Normalize and validate a query pattern. Empty patterns are fine.
    pub fn encode_pattern<'a>(&self, pattern: &'a [u8]) -> Result<Cow<'a, [u8]>> {
        let normalized = self.normalize(pattern);
        if let Some(position) = self.find_terminator(&normalized) {
            return Err(QueryError::ReservedByte {
                position,
                byte: self.terminator,
            }
            .into());
        }
        Ok(normalized)
    }

    #[inline]
    fn find_terminator(&self, bytes: &[u8]) -> Option<usize> {
        bytes.iter().position(|&b| b == self.terminator)
    }
}

fn fold_ascii(bytes: &[u8]) -> Cow<'_, [u8]> {
    if bytes.iter().any(u8::is_ascii_uppercase) {
        Cow::Owned(bytes.to_ascii_lowercase())
    } else {
        Cow::Borrowed(bytes)
    }
}

/// NFD normalize, drop combining marks, lowercase.
///
/// - "café" → "cafe"
/// - "naïve" → "naive"
#[cfg(feature = "unicode-normalization")]
fn normalize_unicode(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Lowercase only when built without `unicode-normalization`.
#[cfg(not(feature = "unicode-normalization"))]
fn normalize_unicode(value: &str) -> String {
    value.to_lowercase()
}

/// Combining marks (Unicode category Mn) in the blocks that show up in practice.
#[cfg(feature = "unicode-normalization")]
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1AB0}'..='\u{1AFF}' |  // Combining Diacritical Marks Extended
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}
