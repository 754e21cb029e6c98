// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fixed scenarios every backend must answer the same way.

use super::common::{brute_force_locate, build_all, corpus, located, BANANA, WORDS};
use haystack::{
    build_haystack, Backend, Haystack, Occurrence, RadixMode, RadixTreeOptions, StringId,
};

#[test]
fn banana_scenario() {
    for haystack in build_all(BANANA) {
        assert_eq!(haystack.count(b"ana").unwrap(), 4);
        assert!(haystack.contains(b"ana").unwrap());
        assert!(!haystack.contains(b"xyz").unwrap());
        assert_eq!(haystack.count(b"").unwrap(), 12);
    }
}

#[test]
fn banana_locations() {
    for haystack in build_all(BANANA) {
        assert_eq!(
            haystack.locate_sorted(b"nan").unwrap(),
            vec![
                Occurrence::new(StringId(0), 2),
                Occurrence::new(StringId(1), 1),
            ]
        );
        assert_eq!(
            haystack.locate_sorted(b"s").unwrap(),
            vec![Occurrence::new(StringId(1), 5)]
        );
    }
}

#[test]
fn empty_pattern_hits_every_offset() {
    let expected: Vec<_> = (0..6)
        .map(|i| Occurrence::new(StringId(0), i))
        .chain((0..6).map(|i| Occurrence::new(StringId(1), i)))
        .collect();
    for haystack in build_all(BANANA) {
        assert_eq!(located(haystack.as_ref(), b""), expected);
    }
}

#[test]
fn patterns_never_cross_string_boundaries() {
    // "banana" + "ananas" would contain "aa" if the strings were glued together
    for haystack in build_all(BANANA) {
        assert!(!haystack.contains(b"aa").unwrap());
        assert!(!haystack.contains(b"aan").unwrap());
    }
}

#[test]
fn vocabulary_matches_brute_force() {
    let corpus = corpus(WORDS);
    for haystack in build_all(WORDS) {
        for pattern in ["ear", "sea", "art", "star", "arch", "h", "rest", "tart", "q"] {
            assert_eq!(
                located(haystack.as_ref(), pattern.as_bytes()),
                brute_force_locate(&corpus, pattern.as_bytes()),
                "pattern {:?}",
                pattern
            );
        }
    }
}

#[test]
fn single_byte_strings() {
    for haystack in build_all(&["a", "a", "b"]) {
        assert_eq!(haystack.count(b"a").unwrap(), 2);
        assert_eq!(haystack.count(b"ab").unwrap(), 0);
        assert_eq!(haystack.count(b"").unwrap(), 3);
    }
}

#[test]
fn repeated_symbols() {
    let text = "a".repeat(200);
    for haystack in build_all(&[text.as_str()]) {
        assert_eq!(haystack.count(b"aaaa").unwrap(), 197);
        assert_eq!(haystack.count(text.as_bytes()).unwrap(), 1);
    }
}

#[test]
fn whole_string_backend_answers_prefixes() {
    let options = RadixTreeOptions {
        mode: RadixMode::WholeString,
    };
    let haystack = build_haystack(corpus(WORDS), &Backend::RadixTree(options)).unwrap();
    let found: Vec<_> = haystack
        .locate_sorted(b"sea")
        .unwrap()
        .into_iter()
        .map(|o| o.string_id.get())
        .collect();
    assert_eq!(found, vec![0, 1, 3, 4]);
    assert!(haystack.enumerate_prefix(b"each").unwrap().all(|o| o.offset == 0));
}

#[test]
fn haystacks_are_shareable_across_threads() {
    let haystack: std::sync::Arc<dyn Haystack> =
        std::sync::Arc::from(build_haystack(corpus(WORDS), &Backend::default()).unwrap());
    let handles: Vec<_> = ["ear", "art", "sea"]
        .into_iter()
        .map(|pattern| {
            let haystack = std::sync::Arc::clone(&haystack);
            std::thread::spawn(move || haystack.count(pattern.as_bytes()).unwrap())
        })
        .collect();
    let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(counts, vec![6, 4, 5]);
}
