// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Field-scoped option sets (facet, highlight).

use std::collections::BTreeMap;

use super::validator::{FieldList, OptionArgs, OptionKind};
use crate::error::Result;
use crate::params::{ParamValue, Params};
use crate::schema::FieldCatalogue;

/// Options per targeted field; the `None` key holds global options.
type FieldMap = BTreeMap<Option<String>, BTreeMap<String, ParamValue>>;

/// Validated options for one option kind, scoped per field or globally.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldOptions {
    kind: &'static OptionKind,
    fields: FieldMap,
}

impl FieldOptions {
    pub fn new(kind: &'static OptionKind) -> Self {
        Self {
            kind,
            fields: FieldMap::new(),
        }
    }

    pub fn kind(&self) -> &'static OptionKind {
        self.kind
    }

    /// Nothing registered: the option kind is disabled
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Names of the targeted fields, sorted
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().flatten().map(String::as_str).collect()
    }

    /// Options stored for `field` (`None` for global options)
    pub fn get(&self, field: Option<&str>) -> Option<&BTreeMap<String, ParamValue>> {
        self.fields.get(&field.map(str::to_string))
    }

    /// Register `fields` and apply `options` to each of them.
    ///
    /// With no fields, the options apply globally. Fields named without any
    /// options are still registered, which enables the option kind for them.
    /// Validation happens before anything is stored.
    pub fn update(
        &mut self,
        catalogue: &dyn FieldCatalogue,
        fields: &[&str],
        options: OptionArgs,
    ) -> Result<()> {
        catalogue.check_fields(fields)?;

        let mut validated = Vec::with_capacity(options.len());
        for (key, value) in options.iter() {
            validated.push((key.to_string(), self.kind.validate(catalogue, key, value)?));
        }

        let targets: Vec<Option<String>> = if !fields.is_empty() {
            fields.iter().map(|f| Some((*f).to_string())).collect()
        } else if !validated.is_empty() {
            vec![None]
        } else {
            Vec::new()
        };

        for target in targets {
            let entry = self.fields.entry(target).or_default();
            for (key, value) in &validated {
                entry.insert(key.clone(), value.clone());
            }
        }
        Ok(())
    }

    /// Flat parameter map for this option kind.
    pub fn options(&self) -> Params {
        let mut opts = Params::new();
        if self.fields.is_empty() {
            return opts;
        }

        let name = self.kind.name;
        opts.insert(name.to_string(), ParamValue::Bool(true));

        let field_names = self.field_names();
        if !field_names.is_empty() {
            match self.kind.field_list {
                FieldList::Repeated(key) => {
                    let names = field_names.iter().map(|f| f.to_string()).collect();
                    opts.insert(key.to_string(), ParamValue::List(names));
                }
                FieldList::Joined(key) => {
                    opts.insert(key.to_string(), ParamValue::Str(field_names.join(",")));
                }
                FieldList::None => {}
            }
        }

        for (field, field_opts) in &self.fields {
            for (opt, value) in field_opts {
                let key = match field {
                    None => format!("{}.{}", name, opt),
                    Some(field) => format!("f.{}.{}.{}", field, name, opt),
                };
                opts.insert(key, value.clone());
            }
        }
        opts
    }
}
