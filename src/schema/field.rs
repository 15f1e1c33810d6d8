// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Field descriptors and typed field values.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;

use crate::error::{Result, SearchError};

/// Value kinds a field can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Analyzed full-text field
    Text,
    /// Unanalyzed string field
    String,
    /// Integer field (int, long)
    #[serde(alias = "int", alias = "long")]
    Integer,
    /// Floating point field (float, double)
    #[serde(alias = "double")]
    Float,
    #[serde(alias = "bool")]
    Boolean,
    Date,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => write!(f, "text"),
            FieldKind::String => write!(f, "string"),
            FieldKind::Integer => write!(f, "integer"),
            FieldKind::Float => write!(f, "float"),
            FieldKind::Boolean => write!(f, "boolean"),
            FieldKind::Date => write!(f, "date"),
        }
    }
}

/// A typed value supplied when querying a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Date(DateTime<Utc>),
    /// Several values: a multi-valued fan-out, or the two ends of a range
    List(Vec<FieldValue>),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Date(d) => write!(f, "{}", format_date(d)),
            FieldValue::List(items) => {
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        FieldValue::Text(value.clone())
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        FieldValue::Float(f64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Date(value)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(values: Vec<T>) -> Self {
        FieldValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl<A: Into<FieldValue>, B: Into<FieldValue>> From<(A, B)> for FieldValue {
    fn from((a, b): (A, B)) -> Self {
        FieldValue::List(vec![a.into(), b.into()])
    }
}

/// Output of [`FieldDescriptor::serialize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Serialized {
    One(String),
    /// Multi-valued fan-out: each value is matched separately
    Many(Vec<String>),
}

impl Serialized {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Serialized::One(s) => vec![s],
            Serialized::Many(values) => values,
        }
    }
}

/// Typed description of one catalogued field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name, or the pattern for a dynamic field (e.g. `*_s`)
    pub name: String,
    pub kind: FieldKind,
    pub multi_valued: bool,
    pub indexed: bool,
}

impl FieldDescriptor {
    /// Create an indexed, single-valued field
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            multi_valued: false,
            indexed: true,
        }
    }

    #[must_use]
    pub fn multi_valued(mut self) -> Self {
        self.multi_valued = true;
        self
    }

    #[must_use]
    pub fn not_indexed(mut self) -> Self {
        self.indexed = false;
        self
    }

    /// Text-typed fields get escaped and split into terms and phrases.
    pub fn is_text_typed(&self) -> bool {
        matches!(self.kind, FieldKind::Text | FieldKind::String)
    }

    pub fn is_boolean_typed(&self) -> bool {
        self.kind == FieldKind::Boolean
    }

    pub fn is_numeric_typed(&self) -> bool {
        matches!(self.kind, FieldKind::Integer | FieldKind::Float)
    }

    pub fn is_multi_valued(&self) -> bool {
        self.multi_valued
    }

    pub fn is_indexed(&self) -> bool {
        self.indexed
    }

    /// Serialize a value into its query-language form.
    ///
    /// A list is only accepted for multi-valued fields, and yields
    /// [`Serialized::Many`].
    pub fn serialize(&self, value: &FieldValue) -> Result<Serialized> {
        match value {
            FieldValue::List(items) => {
                if !self.multi_valued {
                    return Err(SearchError::InvalidArgument(format!(
                        "field '{}' is not multi-valued and can't take a list of values",
                        self.name
                    )));
                }
                let values = items
                    .iter()
                    .map(|item| self.serialize_scalar(item))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Serialized::Many(values))
            }
            scalar => self.serialize_scalar(scalar).map(Serialized::One),
        }
    }

    /// Serialize exactly one value (range bounds, single matches).
    pub fn serialize_scalar(&self, value: &FieldValue) -> Result<String> {
        let rejected = || {
            SearchError::InvalidArgument(format!(
                "'{}' is not a valid {} value for field '{}'",
                value, self.kind, self.name
            ))
        };

        match (self.kind, value) {
            (_, FieldValue::List(_)) => Err(rejected()),
            (FieldKind::Text | FieldKind::String, v) => Ok(v.to_string()),
            (FieldKind::Boolean, FieldValue::Bool(b)) => Ok(b.to_string()),
            (FieldKind::Boolean, FieldValue::Text(s)) => match s.to_ascii_lowercase().as_str() {
                "true" => Ok("true".to_string()),
                "false" => Ok("false".to_string()),
                _ => Err(rejected()),
            },
            (FieldKind::Integer, FieldValue::Int(i)) => Ok(i.to_string()),
            (FieldKind::Integer, FieldValue::Float(f)) => exact_i64(*f)
                .map(|i| i.to_string())
                .ok_or_else(rejected),
            (FieldKind::Integer, FieldValue::Text(s)) => s
                .trim()
                .parse::<i64>()
                .map(|i| i.to_string())
                .map_err(|_| rejected()),
            (FieldKind::Float, FieldValue::Int(i)) => Ok(i.to_string()),
            (FieldKind::Float, FieldValue::Float(f)) if f.is_finite() => Ok(f.to_string()),
            (FieldKind::Float, FieldValue::Text(s)) => match s.trim().parse::<f64>() {
                Ok(f) if f.is_finite() => Ok(f.to_string()),
                _ => Err(rejected()),
            },
            (FieldKind::Date, FieldValue::Date(d)) => Ok(format_date(d)),
            (FieldKind::Date, FieldValue::Text(s)) => DateTime::parse_from_rfc3339(s.trim())
                .map(|d| format_date(&d.with_timezone(&Utc)))
                .map_err(|_| rejected()),
            _ => Err(rejected()),
        }
    }

    /// Order two serialized values the way the field orders them.
    ///
    /// Numeric and date fields compare by value; everything else (and any
    /// value that fails to parse back) compares lexically.
    pub fn compare_serialized(&self, a: &str, b: &str) -> Ordering {
        let typed = match self.kind {
            FieldKind::Integer => match (a.parse::<i64>(), b.parse::<i64>()) {
                (Ok(x), Ok(y)) => Some(x.cmp(&y)),
                _ => None,
            },
            FieldKind::Float => match (a.parse::<f64>(), b.parse::<f64>()) {
                (Ok(x), Ok(y)) => x.partial_cmp(&y),
                _ => None,
            },
            FieldKind::Date => match (DateTime::parse_from_rfc3339(a), DateTime::parse_from_rfc3339(b)) {
                (Ok(x), Ok(y)) => Some(x.cmp(&y)),
                _ => None,
            },
            _ => None,
        };
        typed.unwrap_or_else(|| a.cmp(b))
    }
}

/// `f` as an `i64`, if it is a whole number the type can hold exactly.
pub(crate) fn exact_i64(f: f64) -> Option<i64> {
    // -2^63 is representable; i64::MAX rounds up to 2^63, which is not
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    if f.is_finite() && f.fract() == 0.0 && (-BOUND..BOUND).contains(&f) {
        Some(f as i64)
    } else {
        None
    }
}

fn format_date(d: &DateTime<Utc>) -> String {
    d.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
