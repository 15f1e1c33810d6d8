// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Highlighting options (`hl`, `hl.fl`, `f.<field>.hl.<opt>`).

use super::field_options::FieldOptions;
use super::validator::{FieldList, Literal, OptionKind, Validator};

const FORMATTERS: &[Literal] = &[Literal::Str("simple")];

/// Highlight option table
pub static HIGHLIGHT: OptionKind = OptionKind {
    name: "hl",
    field_list: FieldList::Joined("hl.fl"),
    allowed: &[
        ("snippets", Validator::Int),
        ("fragsize", Validator::Int),
        ("mergeContinuous", Validator::Bool),
        ("requireFieldMatch", Validator::Bool),
        ("maxAnalyzedChars", Validator::Int),
        ("alternateField", Validator::CatalogueField),
        ("maxAlternateFieldLength", Validator::Int),
        ("formatter", Validator::OneOf(FORMATTERS)),
        ("simple.pre", Validator::Str),
        ("simple.post", Validator::Str),
        ("fragmenter", Validator::Str),
        ("usePhraseHighlighter", Validator::Bool),
        ("highlightMultiTerm", Validator::Bool),
        ("regex.slop", Validator::Float),
        ("regex.pattern", Validator::Str),
        ("regex.maxAnalyzedChars", Validator::Int),
    ],
};

impl FieldOptions {
    /// Empty highlight options
    pub fn highlight() -> Self {
        Self::new(&HIGHLIGHT)
    }
}
