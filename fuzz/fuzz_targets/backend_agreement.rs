// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for cross-backend agreement.
//!
//! Builds every substring backend over arbitrary byte strings and checks each
//! one against the brute-force scan. Rejected corpora and patterns must come
//! back as errors, never panics.

#![no_main]

use arbitrary::Arbitrary;
use haystack::testing::{brute_force_locate, substring_backends};
use haystack::{build_haystack, sort_occurrences, Corpus, Haystack};
use libfuzzer_sys::fuzz_target;
use std::sync::Arc;

#[derive(Debug, Arbitrary)]
struct Input {
    strings: Vec<Vec<u8>>,
    pattern: Vec<u8>,
}

fuzz_target!(|input: Input| {
    if input.strings.len() > 64 || input.strings.iter().map(Vec::len).sum::<usize>() > 4096 {
        return;
    }

    let corpus = match Corpus::build(&input.strings) {
        Ok(corpus) => Arc::new(corpus),
        Err(err) => {
            assert!(err.is_invalid_input(), "unexpected build error: {}", err);
            return;
        }
    };
    let expected = brute_force_locate(&corpus, &input.pattern);

    for backend in substring_backends() {
        let haystack = build_haystack(Arc::clone(&corpus), &backend).expect("valid corpus builds");
        match haystack.locate(&input.pattern) {
            Ok(found) => {
                let found = sort_occurrences(found.collect());
                assert_eq!(found, expected, "{:?} disagrees", backend);
                assert_eq!(haystack.count(&input.pattern).ok(), Some(expected.len()));
            }
            Err(err) => {
                assert!(err.is_invalid_query(), "unexpected query error: {}", err);
                assert!(input.pattern.contains(&corpus.alphabet().terminator));
            }
        }
    }
});
