// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! More-like-this options (`mlt`, `mlt.fl`, `mlt.qf`, `mlt.<opt>`).
//!
//! Unlike facet and highlight, every mlt option is global. The query-field
//! map (`mlt.qf`) weights individual target fields.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use super::validator::{FieldList, OptionArgs, OptionKind, Validator};
use crate::error::{Result, SearchError};
use crate::params::{ParamValue, Params};
use crate::schema::FieldCatalogue;

/// More-like-this option table
pub static MORE_LIKE_THIS: OptionKind = OptionKind {
    name: "mlt",
    field_list: FieldList::Joined("mlt.fl"),
    allowed: &[
        ("count", Validator::Int),
        ("mintf", Validator::Int),
        ("mindf", Validator::Int),
        ("minwl", Validator::Int),
        ("maxwl", Validator::Int),
        ("maxqt", Validator::Int),
        ("maxntp", Validator::Int),
        ("boost", Validator::Bool),
    ],
};

/// Similar-document options
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoreLikeThisOptions {
    fields: BTreeSet<String>,
    /// Target field -> optional boost
    query_fields: BTreeMap<String, Option<f64>>,
    options: BTreeMap<String, ParamValue>,
}

impl MoreLikeThisOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.query_fields.is_empty() && self.options.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    /// Add target fields, query-field boosts and options.
    ///
    /// A query field must be one of the target fields (already registered or
    /// named in this call). Nothing is stored unless everything validates.
    pub fn update(
        &mut self,
        catalogue: &dyn FieldCatalogue,
        fields: &[&str],
        query_fields: &[(&str, Option<f64>)],
        options: OptionArgs,
    ) -> Result<()> {
        catalogue.check_fields(fields)?;

        let mut targets = self.fields.clone();
        targets.extend(fields.iter().map(|f| f.to_string()));

        for (field, boost) in query_fields {
            if !targets.contains(*field) {
                debug!(field, "Query field is not a target field");
                return Err(SearchError::invalid_option(
                    MORE_LIKE_THIS.name,
                    "qf",
                    format!("'{}' is not one of the mlt fields", field),
                ));
            }
            if let Some(boost) = boost {
                if !boost.is_finite() {
                    debug!(field, boost, "Query field boost rejected");
                    return Err(SearchError::invalid_option(
                        MORE_LIKE_THIS.name,
                        "qf",
                        format!("'{}' boost must be a finite number", field),
                    ));
                }
            }
        }

        let mut validated = Vec::with_capacity(options.len());
        for (key, value) in options.iter() {
            validated.push((key.to_string(), MORE_LIKE_THIS.validate(catalogue, key, value)?));
        }

        self.fields = targets;
        for (field, boost) in query_fields {
            self.query_fields.insert(field.to_string(), *boost);
        }
        self.options.extend(validated);
        Ok(())
    }

    pub fn options(&self) -> Params {
        let mut opts = Params::new();
        if !self.fields.is_empty() {
            let names: Vec<&str> = self.fields().collect();
            opts.insert("mlt".to_string(), ParamValue::Bool(true));
            opts.insert("mlt.fl".to_string(), ParamValue::Str(names.join(",")));
        }

        if !self.query_fields.is_empty() {
            let qf: Vec<String> = self
                .query_fields
                .iter()
                .map(|(field, boost)| match boost {
                    Some(boost) => format!("{}^{}", field, boost),
                    None => field.clone(),
                })
                .collect();
            opts.insert("mlt.qf".to_string(), ParamValue::Str(qf.join(" ")));
        }

        for (key, value) in &self.options {
            opts.insert(format!("mlt.{}", key), value.clone());
        }
        opts
    }
}
