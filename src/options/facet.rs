// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Faceting options (`facet`, `facet.field`, `f.<field>.facet.<opt>`).

use super::field_options::FieldOptions;
use super::validator::{FieldList, Literal, OptionKind, Validator};

const SORT_MODES: &[Literal] = &[
    Literal::Bool(true),
    Literal::Bool(false),
    Literal::Str("count"),
    Literal::Str("index"),
];

const METHODS: &[Literal] = &[Literal::Str("enum"), Literal::Str("fc")];

/// Facet option table
pub static FACET: OptionKind = OptionKind {
    name: "facet",
    field_list: FieldList::Repeated("facet.field"),
    allowed: &[
        ("prefix", Validator::Str),
        ("sort", Validator::OneOf(SORT_MODES)),
        ("limit", Validator::Int),
        ("offset", Validator::NonNegativeInt),
        ("mincount", Validator::NonNegativeInt),
        ("missing", Validator::Bool),
        ("method", Validator::OneOf(METHODS)),
        ("enum.cache.minDf", Validator::Int),
    ],
};

impl FieldOptions {
    /// Empty facet options
    pub fn facet() -> Self {
        Self::new(&FACET)
    }
}
