//! Integration Tests for Solr Query
//!
//! End-to-end request building against a realistic schema: chained
//! criteria, combinators, every option set, and the flattened parameter
//! list handed to a transport.
//!
//! # Running Tests
//! ```bash
//! cargo test --test integration
//! ```

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use serde_json::json;

use solr_query::{
    Criteria, FieldCatalogue, FieldKind, OptionArgs, ParamValue, Schema, SchemaConfig,
    SearchError, SearchRequest,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

const SCHEMA_JSON: &str = r#"{
    "default_field": "text",
    "unique_key": "id",
    "fields": [
        {"name": "id", "kind": "string"},
        {"name": "text", "kind": "text", "multi_valued": true},
        {"name": "name", "kind": "text"},
        {"name": "status", "kind": "string"},
        {"name": "age", "kind": "int"},
        {"name": "price", "kind": "double"},
        {"name": "in_stock", "kind": "bool"},
        {"name": "published", "kind": "date"},
        {"name": "category", "kind": "string"},
        {"name": "tags", "kind": "string", "multi_valued": true},
        {"name": "internal_notes", "kind": "text", "indexed": false}
    ],
    "dynamic_fields": [
        {"name": "*_s", "kind": "string"},
        {"name": "*_i", "kind": "int"}
    ]
}"#;

fn catalogue() -> Arc<dyn FieldCatalogue> {
    Arc::new(Schema::from_json(SCHEMA_JSON).expect("valid schema"))
}

fn request() -> SearchRequest {
    SearchRequest::new(catalogue())
}

fn q_param(req: &SearchRequest) -> String {
    req.query_string().unwrap().unwrap_or_default()
}

// =============================================================================
// Happy Path: query building
// =============================================================================

#[test]
fn happy_chained_query_and_sort_and_paging() {
    let req = request()
        .query(Criteria::new().field("name", "fred").field("age__gte", 30))
        .unwrap()
        .query(Criteria::new().field("status", "active"))
        .unwrap()
        .sort_by("-score")
        .unwrap()
        .sort_by("name")
        .unwrap()
        .paginate(Some(0), Some(10))
        .unwrap();

    let opts = req.options().unwrap();
    assert_eq!(opts["q"], ParamValue::from("name:fred AND status:active AND age:[30 TO *]"));
    assert_eq!(opts["sort"], ParamValue::from("score desc, name asc"));
    assert_eq!(opts["start"], ParamValue::Int(0));
    assert_eq!(opts["rows"], ParamValue::Int(10));
}

#[test]
fn happy_combinator_expression_as_subquery() {
    let req = request();
    let fred_or_wilma = req
        .q(Criteria::new().field("name", "fred"))
        .unwrap()
        .or(req.q(Criteria::new().field("name", "wilma")).unwrap());
    let adults = req.q(Criteria::new().field("age__gte", 18)).unwrap();

    let req = req
        .query(Criteria::new().query(fred_or_wilma.and(adults)))
        .unwrap()
        .exclude(Criteria::new().field("status", "banned"))
        .unwrap();

    assert_eq!(
        q_param(&req),
        "(name:fred OR name:wilma) AND age:[18 TO *] AND NOT status:banned"
    );
}

#[test]
fn happy_defaults_and_dynamic_fields() {
    let req = request()
        .query(Criteria::new().value("hello").value("hello world"))
        .unwrap()
        .filter(Criteria::new().field("colour_s", "red").field("rank_i__lt", 5))
        .unwrap();

    let opts = req.options().unwrap();
    assert_eq!(opts["q"], ParamValue::from("hello AND \"hello world\""));
    assert_eq!(opts["fq"], ParamValue::from("colour_s:red AND rank_i:{* TO 5}"));
    assert_eq!(req.catalogue().unique_key(), Some("id"));
}

#[test]
fn happy_multi_valued_fan_out() {
    let req = request()
        .filter(Criteria::new().field("tags", vec!["rust", "search"]))
        .unwrap();
    assert_eq!(
        req.options().unwrap()["fq"],
        ParamValue::from("tags:rust AND tags:search")
    );
}

#[test]
fn happy_typed_values() {
    let published = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let req = request()
        .query(
            Criteria::new()
                .field("in_stock", true)
                .field("price__range", (99.5, 10))
                .field("published__gt", published),
        )
        .unwrap();

    assert_eq!(
        q_param(&req),
        "in_stock:true AND price:[10 TO 99.5] AND published:{2024-03-01T12:00:00Z TO *}"
    );
}

#[test]
fn happy_escaping() {
    let req = request()
        .query_by_term(Criteria::new().field("name", "a+b"))
        .unwrap()
        .query(Criteria::new().field("name", "AND"))
        .unwrap()
        .query_by_phrase(Criteria::new().field("name", "say \"hi\""))
        .unwrap();

    assert_eq!(q_param(&req), "name:\"AND\" AND name:a\\+b AND name:\"say \\\"hi\\\"\"");
}

#[test]
fn happy_boost_relevancy() {
    let req = request()
        .query(Criteria::new().field("category", "books"))
        .unwrap()
        .boost_relevancy(3.0, Criteria::new().field("in_stock", true))
        .unwrap();

    assert_eq!(
        q_param(&req),
        "category:books OR (category:books AND in_stock:true^3)"
    );
}

// =============================================================================
// Happy Path: option sets and parameter output
// =============================================================================

#[test]
fn happy_full_request_params() {
    let req = request()
        .query(Criteria::new().field("name", "fred"))
        .unwrap()
        .facet_by(&["category", "tags"], OptionArgs::from([("limit", 10)]))
        .unwrap()
        .facet_by(&[], OptionArgs::from([("mincount", 1)]))
        .unwrap()
        .highlight(&["name"], OptionArgs::new().with("snippets", 2))
        .unwrap()
        .mlt(&["name", "text"], &[("name", Some(2.0))], OptionArgs::from([("count", 5)]))
        .unwrap()
        .paginate(Some(20), Some(10))
        .unwrap();

    let params = req.params().unwrap();
    let expected: Vec<(String, String)> = [
        ("f.category.facet.limit", "10"),
        ("f.name.hl.snippets", "2"),
        ("f.tags.facet.limit", "10"),
        ("facet", "true"),
        ("facet.field", "category"),
        ("facet.field", "tags"),
        ("facet.mincount", "1"),
        ("hl", "true"),
        ("hl.fl", "name"),
        ("mlt", "true"),
        ("mlt.count", "5"),
        ("mlt.fl", "name,text"),
        ("mlt.qf", "name^2"),
        ("q", "name:fred"),
        ("rows", "10"),
        ("start", "20"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    assert_eq!(params, expected);
}

#[test]
fn happy_params_snapshot_as_json() {
    let req = request()
        .query(Criteria::new().field("name", "fred"))
        .unwrap()
        .facet_by(&["category"], OptionArgs::new())
        .unwrap()
        .paginate(None, Some(5))
        .unwrap();

    let snapshot = serde_json::to_value(req.options().unwrap()).unwrap();
    assert_eq!(
        snapshot,
        json!({
            "facet": true,
            "facet.field": ["category"],
            "q": "name:fred",
            "rows": 5
        })
    );
}

#[test]
fn happy_builder_reuse_does_not_alias() {
    let base = request().query(Criteria::new().field("name", "fred")).unwrap();
    let left = base.query(Criteria::new().field("status", "active")).unwrap();
    let right = base.exclude(Criteria::new().field("status", "active")).unwrap();

    assert_eq!(q_param(&base), "name:fred");
    assert_eq!(q_param(&left), "name:fred AND status:active");
    assert_eq!(q_param(&right), "name:fred AND NOT status:active");
}

#[test]
fn happy_schema_from_config() {
    let config: SchemaConfig = serde_json::from_str(
        r#"{"fields": [{"name": "title", "kind": "text"}, {"name": "year", "kind": "long"}]}"#,
    )
    .unwrap();
    let schema = Schema::from_config(config).unwrap();
    assert_eq!(schema.resolve("year").unwrap().kind, FieldKind::Integer);

    let req = SearchRequest::with_schema(schema)
        .query(Criteria::new().value("dune").field("year__lte", 1965))
        .unwrap();
    assert_eq!(q_param(&req), "dune AND year:[* TO 1965]");
}

// =============================================================================
// Failure Path: validation
// =============================================================================

#[test]
fn failure_unknown_fields() {
    let req = request();
    assert_eq!(
        req.query(Criteria::new().field("colour", "red")).unwrap_err(),
        SearchError::UnknownField("colour".to_string())
    );
    assert!(matches!(
        req.facet_by(&["colour"], OptionArgs::new()),
        Err(SearchError::UnknownField(_))
    ));
    assert!(matches!(
        req.sort_by("colour"),
        Err(SearchError::InvalidOption { .. })
    ));
}

#[test]
fn failure_bad_values_and_relations() {
    let req = request();
    assert!(matches!(
        req.query(Criteria::new().field("age", "old")),
        Err(SearchError::InvalidArgument(_))
    ));
    assert!(matches!(
        req.query(Criteria::new().field("age__near", 5)),
        Err(SearchError::InvalidArgument(_))
    ));
    assert!(matches!(
        req.query(Criteria::new().field("in_stock__gt", true)),
        Err(SearchError::UnsupportedOperation(_))
    ));
    assert!(matches!(
        req.query(Criteria::new().field("age__range", 5)),
        Err(SearchError::InvalidArgument(_))
    ));
    assert!(matches!(
        req.query(Criteria::new().field("status", vec!["a", "b"])),
        Err(SearchError::InvalidArgument(_))
    ));
}

#[test]
fn failure_option_validation() {
    let req = request();
    assert!(matches!(
        req.facet_by(&["category"], OptionArgs::from([("mincount", -1)])),
        Err(SearchError::InvalidOption { .. })
    ));
    assert!(matches!(
        req.highlight(&["name"], OptionArgs::from([("alternateField", "nope")])),
        Err(SearchError::InvalidOption { .. })
    ));
    assert!(matches!(
        req.mlt(&["name"], &[("text", None)], OptionArgs::new()),
        Err(SearchError::InvalidOption { .. })
    ));
    assert!(matches!(
        req.sort_by("tags"),
        Err(SearchError::InvalidOption { .. })
    ));
    assert!(matches!(
        req.sort_by("-internal_notes"),
        Err(SearchError::InvalidOption { .. })
    ));
}

#[test]
fn failure_paging_and_boosting() {
    let req = request();
    assert!(matches!(
        req.paginate(Some(-1), None),
        Err(SearchError::InvalidArgument(_))
    ));
    assert_eq!(
        req.boost_relevancy(2.0, Criteria::new().field("name", "x")).unwrap_err(),
        SearchError::EmptyQuery
    );

    let node = req.q(Criteria::new().field("name", "fred")).unwrap();
    assert!(matches!(node.clone().boost(0.0), Err(SearchError::InvalidArgument(_))));
    assert!(matches!(node.boost_str("lots"), Err(SearchError::InvalidArgument(_))));
}

#[test]
fn failure_schema_config() {
    let err = Schema::from_json(
        r#"{"default_field": "age", "fields": [{"name": "age", "kind": "int"}]}"#,
    )
    .unwrap_err();
    assert!(matches!(err, SearchError::InvalidArgument(_)));
    assert!(Schema::from_json(r#"{"fields": [{"name": "x", "kind": "blob"}]}"#).is_err());
}

#[test]
fn failure_empty_operands() {
    let req = request().query(Criteria::new().field("name", "fred")).unwrap();
    let nothing = req.q(Criteria::new()).unwrap();

    for result in [
        req.exclude(Criteria::new()),
        req.exclude(Criteria::new().query(nothing.clone())),
        req.filter_exclude(Criteria::new()),
        req.boost_relevancy(2.0, Criteria::new()),
        req.boost_relevancy(2.0, Criteria::new().query(nothing)),
    ] {
        assert!(matches!(result, Err(SearchError::InvalidArgument(_))));
    }
    assert_eq!(q_param(&req), "name:fred");
}

#[test]
fn failure_integers_beyond_64_bits() {
    let req = request();
    assert!(matches!(
        req.query(Criteria::new().field("age", 1e19)),
        Err(SearchError::InvalidArgument(_))
    ));
    assert!(matches!(
        req.query(Criteria::new().field("age__range", (-1e19, 5))),
        Err(SearchError::InvalidArgument(_))
    ));
    assert!(matches!(
        req.facet_by(&["category"], OptionArgs::from([("limit", 1e19)])),
        Err(SearchError::InvalidOption { .. })
    ));
    assert_eq!(
        q_param(&req.query(Criteria::new().field("age", 42.0)).unwrap()),
        "age:42"
    );
}
