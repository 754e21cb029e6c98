// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy at the public boundary.

use super::common::{build_all, BANANA};
use haystack::{Alphabet, Corpus, HaystackError, InputError, IntervalTree, QueryError};

#[test]
fn empty_collection_is_invalid_input() {
    let empty: [&str; 0] = [];
    assert_eq!(
        Corpus::build(empty).unwrap_err(),
        HaystackError::InvalidInput(InputError::EmptyCollection)
    );
}

#[test]
fn empty_string_is_invalid_input() {
    assert_eq!(
        Corpus::build(["ok", ""]).unwrap_err(),
        HaystackError::InvalidInput(InputError::EmptyString { index: 1 })
    );
}

#[test]
fn terminator_in_source_reports_position() {
    let err = Corpus::build(["fine", "bro\0ken"]).unwrap_err();
    assert_eq!(
        err,
        HaystackError::InvalidInput(InputError::ReservedByte {
            index: 1,
            position: 3,
            byte: 0
        })
    );
}

#[test]
fn custom_terminator_frees_nul() {
    let alphabet = Alphabet::default().with_terminator(b'|');
    let corpus = Corpus::build_with(["a\0b"], &alphabet).unwrap();
    assert_eq!(corpus.data_len(), 3);
    assert!(Corpus::build_with(["a|b"], &alphabet).unwrap_err().is_invalid_input());
}

#[test]
fn terminator_in_pattern_is_invalid_query() {
    for haystack in build_all(BANANA) {
        let err = haystack.count(b"ana\0").unwrap_err();
        assert_eq!(
            err,
            HaystackError::InvalidQuery(QueryError::ReservedByte {
                position: 3,
                byte: 0
            })
        );
    }
}

#[test]
fn inverted_range_is_invalid_query() {
    let tree: IntervalTree<()> = IntervalTree::new();
    assert_eq!(
        tree.query_overlap(10, 2).unwrap_err(),
        HaystackError::InvalidQuery(QueryError::InvertedRange { start: 10, end: 2 })
    );
}

#[test]
fn errors_render_for_humans() {
    let err = Corpus::build(["ok", ""]).unwrap_err();
    assert_eq!(err.to_string(), "invalid input: string 1 is empty");
}
