// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Matches resolved to annotated regions through the interval layer.

use super::common::suffix_array_index;
use haystack::{Haystack, StringId, StringRegions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Body,
}

#[test]
fn occurrences_resolve_to_fields() {
    let docs = ["rust search", "fast search in rust"];
    let index = suffix_array_index(&docs);

    let mut fields = StringRegions::new();
    fields.insert(StringId(0), 0, 4, Field::Title).unwrap();
    fields.insert(StringId(0), 4, 11, Field::Body).unwrap();
    fields.insert(StringId(1), 0, 4, Field::Title).unwrap();
    fields.insert(StringId(1), 4, 19, Field::Body).unwrap();

    let pattern = b"rust";
    let mut hits: Vec<(StringId, Field)> = Vec::new();
    for occurrence in index.locate(pattern).unwrap() {
        for (_, &field) in fields.annotate(&occurrence, pattern.len() as u32).unwrap() {
            hits.push((occurrence.string_id, field));
        }
    }
    hits.sort_by_key(|&(id, field)| (id, field == Field::Body));

    assert_eq!(
        hits,
        vec![(StringId(0), Field::Title), (StringId(1), Field::Body)]
    );
}

#[test]
fn match_spanning_two_regions_reports_both() {
    let index = suffix_array_index(&["titlebody"]);
    let mut fields = StringRegions::new();
    fields.insert(StringId(0), 0, 5, Field::Title).unwrap();
    fields.insert(StringId(0), 5, 9, Field::Body).unwrap();

    let occurrence = index.locate(b"leb").unwrap().next().unwrap();
    let spanned: Vec<Field> = fields
        .annotate(&occurrence, 3)
        .unwrap()
        .map(|(_, &f)| f)
        .collect();
    assert_eq!(spanned, vec![Field::Title, Field::Body]);
}

#[test]
fn removed_regions_stop_matching() {
    let mut fields = StringRegions::new();
    fields.insert(StringId(3), 10, 20, "note").unwrap();
    assert_eq!(fields.remove(StringId(3), 10, 20).unwrap(), Some("note"));
    assert_eq!(fields.overlapping(StringId(3), 0, 100).unwrap().count(), 0);
    assert!(fields.is_empty());
}
