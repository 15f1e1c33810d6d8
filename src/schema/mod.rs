// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Field catalogue.
//!
//! Queries and option sets never own field metadata: they consult a
//! [`FieldCatalogue`] for field existence, value kinds, multiplicity and
//! serialization. [`Schema`] is the in-memory implementation.
//!
//! # Example
//!
//! ```rust
//! use solr_query::schema::{FieldCatalogue, FieldKind, Schema};
//!
//! let schema = Schema::new()
//!     .with_unique_key("id")
//!     .string("id")
//!     .text("name")
//!     .int("age")
//!     .multi_valued("tags", FieldKind::String)
//!     .dynamic("*_dt", FieldKind::Date);
//!
//! assert!(schema.resolve("name").is_some());
//! assert_eq!(schema.resolve("created_dt").unwrap().kind, FieldKind::Date);
//! assert!(schema.resolve("missing").is_none());
//!
//! // Unqualified terms go to the default field ("text" unless configured)
//! assert_eq!(schema.default_field().name, "text");
//! ```
//!
//! # Design
//!
//! - **Exact names first**: an explicitly declared field always wins
//! - **Longest pattern**: among dynamic patterns, the longest match wins
//! - **Implicit default**: if the default field isn't declared, it is treated
//!   as an indexed text field

mod field;

pub use field::{FieldDescriptor, FieldKind, FieldValue, Serialized};
pub(crate) use field::exact_i64;

use std::collections::BTreeMap;
use std::fmt;

use crate::config::SchemaConfig;
use crate::error::{Result, SearchError};

/// Read-only registry of typed fields.
pub trait FieldCatalogue: Send + Sync + fmt::Debug {
    /// Look up a field by name.
    fn resolve(&self, name: &str) -> Option<&FieldDescriptor>;

    /// Descriptor used for unqualified terms and phrases.
    fn default_field(&self) -> &FieldDescriptor;

    fn unique_key(&self) -> Option<&str> {
        None
    }

    /// Resolve a field or fail with [`SearchError::UnknownField`].
    fn require(&self, name: &str) -> Result<&FieldDescriptor> {
        self.resolve(name)
            .ok_or_else(|| SearchError::UnknownField(name.to_string()))
    }

    /// Check that every name is a catalogued field.
    fn check_fields(&self, names: &[&str]) -> Result<()> {
        for name in names {
            self.require(name)?;
        }
        Ok(())
    }
}

/// In-memory field catalogue.
#[derive(Debug, Clone)]
pub struct Schema {
    fields: BTreeMap<String, FieldDescriptor>,
    /// Kept sorted by pattern length, longest first
    dynamic_fields: Vec<FieldDescriptor>,
    implicit_default: FieldDescriptor,
    unique_key: Option<String>,
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema {
    /// Create an empty catalogue whose default field is `text`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
            dynamic_fields: Vec::new(),
            implicit_default: FieldDescriptor::new("text", FieldKind::Text),
            unique_key: None,
        }
    }

    /// Build a catalogue from configuration.
    ///
    /// Fails if the configured default field is declared with a non-text kind.
    pub fn from_config(config: SchemaConfig) -> Result<Self> {
        let mut schema = Self::new()
            .with_default_field(config.default_field.clone());

        for field in config.fields {
            let mut descriptor = FieldDescriptor::new(field.name, field.kind);
            descriptor.multi_valued = field.multi_valued;
            descriptor.indexed = field.indexed;
            schema = schema.field(descriptor);
        }
        for field in config.dynamic_fields {
            let mut descriptor = FieldDescriptor::new(field.name, field.kind);
            descriptor.multi_valued = field.multi_valued;
            descriptor.indexed = field.indexed;
            schema = schema.dynamic_field(descriptor);
        }
        schema.unique_key = config.unique_key;

        let default = schema.default_field();
        if !default.is_text_typed() {
            return Err(SearchError::InvalidArgument(format!(
                "default field '{}' must be a text field, found {}",
                default.name, default.kind
            )));
        }
        Ok(schema)
    }

    /// Parse a JSON [`SchemaConfig`] and build the catalogue.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SchemaConfig = serde_json::from_str(json)
            .map_err(|e| SearchError::InvalidArgument(format!("invalid schema config: {}", e)))?;
        Self::from_config(config)
    }

    /// Add (or replace) a field
    #[must_use]
    pub fn field(mut self, descriptor: FieldDescriptor) -> Self {
        self.fields.insert(descriptor.name.clone(), descriptor);
        self
    }

    /// Add a text field
    #[must_use]
    pub fn text(self, name: impl Into<String>) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::Text))
    }

    /// Add a string field
    #[must_use]
    pub fn string(self, name: impl Into<String>) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::String))
    }

    /// Add an integer field
    #[must_use]
    pub fn int(self, name: impl Into<String>) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::Integer))
    }

    /// Add a float field
    #[must_use]
    pub fn float(self, name: impl Into<String>) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::Float))
    }

    /// Add a boolean field
    #[must_use]
    pub fn boolean(self, name: impl Into<String>) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::Boolean))
    }

    /// Add a date field
    #[must_use]
    pub fn date(self, name: impl Into<String>) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::Date))
    }

    /// Add a multi-valued field
    #[must_use]
    pub fn multi_valued(self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.field(FieldDescriptor::new(name, kind).multi_valued())
    }

    /// Add a stored-only field (not indexed, so not sortable)
    #[must_use]
    pub fn not_indexed(self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.field(FieldDescriptor::new(name, kind).not_indexed())
    }

    /// Add a dynamic field pattern with a leading or trailing `*`
    #[must_use]
    pub fn dynamic(self, pattern: impl Into<String>, kind: FieldKind) -> Self {
        self.dynamic_field(FieldDescriptor::new(pattern, kind))
    }

    #[must_use]
    pub fn dynamic_field(mut self, descriptor: FieldDescriptor) -> Self {
        self.dynamic_fields.retain(|d| d.name != descriptor.name);
        self.dynamic_fields.push(descriptor);
        self.dynamic_fields
            .sort_by(|a, b| b.name.len().cmp(&a.name.len()).then_with(|| a.name.cmp(&b.name)));
        self
    }

    /// Set the field used for unqualified terms and phrases
    #[must_use]
    pub fn with_default_field(mut self, name: impl Into<String>) -> Self {
        self.implicit_default = FieldDescriptor::new(name, FieldKind::Text);
        self
    }

    #[must_use]
    pub fn with_unique_key(mut self, name: impl Into<String>) -> Self {
        self.unique_key = Some(name.into());
        self
    }

    /// Number of explicitly declared fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn match_dynamic(&self, name: &str) -> Option<&FieldDescriptor> {
        self.dynamic_fields.iter().find(|d| {
            if let Some(suffix) = d.name.strip_prefix('*') {
                name.len() > suffix.len() && name.ends_with(suffix)
            } else if let Some(prefix) = d.name.strip_suffix('*') {
                name.len() > prefix.len() && name.starts_with(prefix)
            } else {
                false
            }
        })
    }
}

impl FieldCatalogue for Schema {
    fn resolve(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name).or_else(|| self.match_dynamic(name))
    }

    fn default_field(&self) -> &FieldDescriptor {
        self.fields
            .get(&self.implicit_default.name)
            .unwrap_or(&self.implicit_default)
    }

    fn unique_key(&self) -> Option<&str> {
        self.unique_key.as_deref()
    }
}
