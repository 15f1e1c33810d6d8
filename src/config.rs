// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Schema configuration.
//!
//! A [`SchemaConfig`] is the serde-friendly description of a field catalogue.
//! Load it from JSON (or any other serde format) and hand it to
//! [`Schema::from_config`](crate::schema::Schema::from_config).
//!
//! # Example
//!
//! ```
//! use solr_query::SchemaConfig;
//!
//! // Minimal config (uses defaults)
//! let config = SchemaConfig::default();
//! assert_eq!(config.default_field, "text");
//!
//! // From JSON
//! let config: SchemaConfig = serde_json::from_str(r#"{
//!     "unique_key": "id",
//!     "fields": [
//!         {"name": "id", "kind": "string"},
//!         {"name": "tags", "kind": "string", "multi_valued": true},
//!         {"name": "price", "kind": "float"}
//!     ]
//! }"#).unwrap();
//! assert_eq!(config.fields.len(), 3);
//! assert!(config.fields[0].indexed);
//! ```

use serde::Deserialize;

use crate::schema::FieldKind;

/// Field catalogue configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaConfig {
    /// Field used for unqualified terms and phrases (default: "text")
    #[serde(default = "default_default_field")]
    pub default_field: String,

    /// Unique key field, if the collection declares one
    #[serde(default)]
    pub unique_key: Option<String>,

    /// Explicitly named fields
    #[serde(default)]
    pub fields: Vec<FieldConfig>,

    /// Dynamic field patterns such as `*_s` or `attr_*`
    #[serde(default)]
    pub dynamic_fields: Vec<FieldConfig>,
}

/// One field (or dynamic field pattern) declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldConfig {
    pub name: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub multi_valued: bool,
    #[serde(default = "default_indexed")]
    pub indexed: bool,
}

fn default_default_field() -> String { "text".to_string() }
fn default_indexed() -> bool { true }

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            default_field: default_default_field(),
            unique_key: None,
            fields: Vec::new(),
            dynamic_fields: Vec::new(),
        }
    }
}
