// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Basic solr-query usage example.
//!
//! Demonstrates:
//! 1. Loading a schema from JSON config
//! 2. Building a query with criteria, combinators and exclusions
//! 3. Adding facets, highlighting, paging and sorting
//! 4. Boosting relevancy without changing the match set
//! 5. Printing the flattened request parameters
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=solr_query=trace cargo run --example basic_usage
//! ```

use solr_query::{Criteria, OptionArgs, Schema, SearchRequest};
use tracing_subscriber::EnvFilter;

const SCHEMA: &str = r#"{
    "unique_key": "id",
    "fields": [
        {"name": "id", "kind": "string"},
        {"name": "title", "kind": "text"},
        {"name": "author", "kind": "text"},
        {"name": "genre", "kind": "string"},
        {"name": "year", "kind": "int"},
        {"name": "rating", "kind": "float"},
        {"name": "available", "kind": "boolean"}
    ]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    println!("\n╔═══════════════════════════════════════════════════════════════╗");
    println!("║           solr-query: Basic Usage Example                     ║");
    println!("╚═══════════════════════════════════════════════════════════════╝\n");

    // ─────────────────────────────────────────────────────────────────────────
    // 1. Schema
    // ─────────────────────────────────────────────────────────────────────────
    let schema = Schema::from_json(SCHEMA)?;
    println!("📦 Loaded schema with {} fields", schema.len());

    // ─────────────────────────────────────────────────────────────────────────
    // 2. Query
    // ─────────────────────────────────────────────────────────────────────────
    let request = SearchRequest::with_schema(schema);

    let classics = request
        .q(Criteria::new().field("year__lt", 1970))?
        .or(request.q(Criteria::new().field("rating__gte", 4.5))?);

    let request = request
        .query(Criteria::new().value("dragons").query(classics))?
        .exclude(Criteria::new().field("genre", "horror"))?
        .filter(Criteria::new().field("available", true))?;

    println!("🔎 q = {}", request.query_string()?.unwrap_or_default());

    // ─────────────────────────────────────────────────────────────────────────
    // 3. Options
    // ─────────────────────────────────────────────────────────────────────────
    let request = request
        .facet_by(&["genre"], OptionArgs::new().with("mincount", 1).with("sort", "count"))?
        .highlight(&["title"], OptionArgs::from([("snippets", 2)]))?
        .paginate(Some(0), Some(20))?
        .sort_by("-score")?
        .sort_by("year")?;

    // ─────────────────────────────────────────────────────────────────────────
    // 4. Relevancy boost
    // ─────────────────────────────────────────────────────────────────────────
    let boosted = request.boost_relevancy(2.0, Criteria::new().field("author", "tolkien"))?;
    println!("🚀 boosted q = {}", boosted.query_string()?.unwrap_or_default());

    // ─────────────────────────────────────────────────────────────────────────
    // 5. Parameters
    // ─────────────────────────────────────────────────────────────────────────
    println!("\n📋 Parameters:");
    for (name, value) in boosted.params()? {
        println!("   {} = {}", name, value);
    }

    println!("\n📄 As JSON:\n{}", serde_json::to_string_pretty(&boosted.options()?)?);
    Ok(())
}
