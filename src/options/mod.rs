// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Option Sets
//!
//! Validated request options, each rendering to a flat [`Params`] map.
//!
//! | Set | Prefix | Scope |
//! |-----|--------|-------|
//! | [`FieldOptions::facet`] | `facet` | global or per field |
//! | [`FieldOptions::highlight`] | `hl` | global or per field |
//! | [`MoreLikeThisOptions`] | `mlt` | global |
//! | [`PaginateOptions`] | `start`, `rows` | global |
//! | [`SortOptions`] | `sort` | global |
//!
//! Every `update` validates its whole input before storing anything.
//!
//! [`Params`]: crate::params::Params

mod facet;
mod field_options;
mod highlight;
mod more_like_this;
mod paginate;
mod sort;
mod validator;

pub use facet::FACET;
pub use field_options::FieldOptions;
pub use highlight::HIGHLIGHT;
pub use more_like_this::{MoreLikeThisOptions, MORE_LIKE_THIS};
pub use paginate::PaginateOptions;
pub use sort::{SortField, SortOptions, SortOrder};
pub use validator::{FieldList, Literal, OptionArgs, OptionKind, Validator};
