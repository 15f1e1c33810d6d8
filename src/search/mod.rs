// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Query Expressions
//!
//! Typed boolean query trees and their Lucene/Solr rendering.
//!
//! # Architecture
//!
//! ```text
//! Criteria (values, field__relation constraints, subqueries)
//!     ↓  validated against the FieldCatalogue
//! QueryNode (Leaf | Or | And | Not | Boost)
//!     ↓
//! LuceneTranslator → q / fq query text
//! ```
//!
//! # Query Language
//!
//! ```text
//! name:fred                     - Term
//! name:"fred flintstone"        - Phrase
//! age:[30 TO *]                 - Range (gte)
//! name:fred AND age:[30 TO *]   - Conjunction
//! status:active OR status:new   - Disjunction
//! NOT status:banned             - Negation
//! (a OR b)^2                    - Boost with grouping
//! ```

mod lucene_translator;
mod query_builder;

pub use lucene_translator::{escape_phrase, escape_term, LuceneTranslator};
pub use query_builder::{
    ClauseKind, Criteria, LeafQuery, QueryNode, RangeBound, RangeClause, RangeRelation, ValueSets,
};
