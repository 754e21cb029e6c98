// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Normalization applies to the corpus and to patterns alike.

use std::sync::Arc;

use haystack::{
    build_haystack, Alphabet, Backend, Corpus, Normalization, Occurrence, StringId,
};

fn haystack_with(strings: &[&str], normalization: Normalization) -> Box<dyn haystack::Haystack> {
    let alphabet = Alphabet::default().with_normalization(normalization);
    let corpus = Arc::new(Corpus::build_with(strings, &alphabet).unwrap());
    build_haystack(corpus, &Backend::default()).unwrap()
}

#[test]
fn ascii_case_fold_matches_any_case() {
    let haystack = haystack_with(&["Hello World", "HELLO"], Normalization::AsciiCaseFold);
    assert_eq!(haystack.count(b"hello").unwrap(), 2);
    assert_eq!(haystack.count(b"HeLLo").unwrap(), 2);
    assert_eq!(
        haystack.locate_sorted(b"WORLD").unwrap(),
        vec![Occurrence::new(StringId(0), 6)]
    );
}

#[test]
fn raw_bytes_are_case_sensitive() {
    let haystack = haystack_with(&["Hello", "hello"], Normalization::None);
    assert_eq!(haystack.count(b"hello").unwrap(), 1);
}

#[cfg(feature = "unicode-normalization")]
#[test]
fn unicode_folds_diacritics() {
    let haystack = haystack_with(&["Café au lait", "naïve"], Normalization::Unicode);
    assert!(haystack.contains("cafe".as_bytes()).unwrap());
    assert!(haystack.contains("CAFÉ".as_bytes()).unwrap());
    assert!(haystack.contains(b"naive").unwrap());
    // offsets refer to the normalized bytes
    assert_eq!(haystack.corpus().string_bytes(StringId(0)).unwrap(), b"cafe au lait");
}
