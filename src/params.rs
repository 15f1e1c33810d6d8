// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Request parameter values.
//!
//! Everything the crate produces ends up in a [`Params`] map: an ordered
//! mapping from Solr parameter name to [`ParamValue`]. The ordering is
//! stable, so two equal requests always produce identical parameter lists.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Flat, ordered parameter map handed to the transport.
pub type Params = BTreeMap<String, ParamValue>;

/// A single parameter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Str(String),
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Repeated parameter (`facet.field=a&facet.field=b`)
    List(Vec<String>),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => write!(f, "{}", s),
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Int(i) => write!(f, "{}", i),
            ParamValue::Float(v) => write!(f, "{}", v),
            ParamValue::List(values) => write!(f, "{}", values.join(",")),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

/// Flatten a parameter map into `(name, value)` string pairs.
///
/// Lists fan out into one pair per element, in order.
pub fn flatten(params: &Params) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(params.len());
    for (name, value) in params {
        match value {
            ParamValue::List(values) => {
                pairs.extend(values.iter().map(|v| (name.clone(), v.clone())));
            }
            other => pairs.push((name.clone(), other.to_string())),
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(ParamValue::from("a b").to_string(), "a b");
        assert_eq!(ParamValue::from(true).to_string(), "true");
        assert_eq!(ParamValue::from(10).to_string(), "10");
        assert_eq!(ParamValue::from(1.5).to_string(), "1.5");
    }

    #[test]
    fn test_flatten_repeats_lists() {
        let mut params = Params::new();
        params.insert("facet".into(), true.into());
        params.insert(
            "facet.field".into(),
            ParamValue::List(vec!["category".into(), "tags".into()]),
        );
        params.insert("rows".into(), 10.into());

        assert_eq!(
            flatten(&params),
            vec![
                ("facet".to_string(), "true".to_string()),
                ("facet.field".to_string(), "category".to_string()),
                ("facet.field".to_string(), "tags".to_string()),
                ("rows".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_serializes_untagged() {
        let mut params = Params::new();
        params.insert("q".into(), "name:fred".into());
        params.insert("rows".into(), 10.into());
        params.insert("hl".into(), true.into());

        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json, serde_json::json!({"hl": true, "q": "name:fred", "rows": 10}));
    }
}
