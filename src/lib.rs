//! # Solr Query
//!
//! Typed query expressions and search request building for Lucene/Solr.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Field Catalogue                        │
//! │  • Field names, kinds, multiplicity, indexing              │
//! │  • Value serialization per field kind                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Query Expression Tree                     │
//! │  • Leaf: terms, phrases, ranges, subqueries                │
//! │  • Combinators: AND, OR, NOT, ^boost                       │
//! │  • Rendered by LuceneTranslator                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Search Request                         │
//! │  • q / fq expressions                                      │
//! │  • facet, hl, mlt, paging and sort option sets             │
//! │  • Flattened to an ordered parameter map                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use solr_query::{Criteria, OptionArgs, Schema, SearchRequest};
//!
//! let schema = Schema::new()
//!     .text("name")
//!     .text("status")
//!     .int("age")
//!     .string("category");
//!
//! let request = SearchRequest::with_schema(schema)
//!     .query(Criteria::new().field("name", "fred"))?
//!     .exclude(Criteria::new().field("status", "banned"))?
//!     .filter(Criteria::new().field("age__range", (18, 65)))?
//!     .facet_by(&["category"], OptionArgs::from([("mincount", 1)]))?
//!     .paginate(Some(0), Some(20))?;
//!
//! for (name, value) in request.params()? {
//!     println!("{}={}", name, value);
//! }
//! # Ok::<(), solr_query::SearchError>(())
//! ```
//!
//! ## Modules
//!
//! - [`schema`]: Field catalogue and value serialization
//! - [`search`]: Query expression tree and Lucene rendering
//! - [`options`]: Facet, highlight, more-like-this, paging and sort options
//! - [`request`]: The [`SearchRequest`] builder
//! - [`config`]: Serde-loadable schema configuration

pub mod config;
pub mod error;
pub mod options;
pub mod params;
pub mod request;
pub mod schema;
pub mod search;

pub use config::{FieldConfig, SchemaConfig};
pub use error::{Result, SearchError};
pub use options::OptionArgs;
pub use params::{ParamValue, Params};
pub use request::SearchRequest;
pub use schema::{FieldCatalogue, FieldKind, FieldValue, Schema};
pub use search::{ClauseKind, Criteria, LuceneTranslator, QueryNode};
