// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

use std::fmt;

use tracing::debug;

use crate::error::{Result, SearchError};
use crate::params::{ParamValue, Params};
use crate::schema::FieldCatalogue;

/// Relevance pseudo-field, always sortable
const SCORE: &str = "score";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField {
    pub field: String,
    pub order: SortOrder,
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.order)
    }
}

/// Ordered sort keys, in the order they were added
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortOptions {
    fields: Vec<SortField>,
}

impl SortOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &[SortField] {
        &self.fields
    }

    /// Append a sort key. `-name` sorts descending, `+name` or `name`
    /// ascending.
    pub fn update(&mut self, catalogue: &dyn FieldCatalogue, field: &str) -> Result<()> {
        let (order, name) = match field.as_bytes().first() {
            Some(b'-') => (SortOrder::Desc, &field[1..]),
            Some(b'+') => (SortOrder::Asc, &field[1..]),
            _ => (SortOrder::Asc, field),
        };

        if name != SCORE {
            let reason = match catalogue.resolve(name) {
                None => Some("not a field in the schema"),
                Some(f) if f.is_multi_valued() => Some("cannot sort on a multi-valued field"),
                Some(f) if !f.is_indexed() => Some("cannot sort on an unindexed field"),
                Some(_) => None,
            };
            if let Some(reason) = reason {
                debug!(field = name, reason, "Sort field rejected");
                return Err(SearchError::invalid_option("sort", name, reason));
            }
        }

        self.fields.push(SortField {
            field: name.to_string(),
            order,
        });
        Ok(())
    }

    pub fn options(&self) -> Params {
        let mut opts = Params::new();
        if !self.fields.is_empty() {
            let keys: Vec<String> = self.fields.iter().map(ToString::to_string).collect();
            opts.insert("sort".to_string(), ParamValue::Str(keys.join(", ")));
        }
        opts
    }
}
