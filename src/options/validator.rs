// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Option validator tables.
//!
//! Each option kind (facet, highlight, more-like-this) is described by one
//! static [`OptionKind`]: its parameter prefix, how its field list is
//! emitted, and an allow-list of `(option name, validator)` pairs.

use std::fmt;

use tracing::debug;

use crate::error::{Result, SearchError};
use crate::params::ParamValue;
use crate::schema::exact_i64;
use crate::schema::FieldCatalogue;

/// A legal literal in an enumerated option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Literal {
    Bool(bool),
    Str(&'static str),
}

impl Literal {
    fn matches(self, value: &ParamValue) -> bool {
        match (self, value) {
            (Literal::Bool(a), ParamValue::Bool(b)) => a == *b,
            (Literal::Str(a), ParamValue::Str(b)) => a == b.as_str(),
            _ => false,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Str(s) => write!(f, "{}", s),
        }
    }
}

/// How a raw option value is checked and coerced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    /// Must equal one of the listed literals
    OneOf(&'static [Literal]),
    Str,
    Int,
    /// Integer that is 0 or greater
    NonNegativeInt,
    Float,
    Bool,
    /// Must name a field in the catalogue
    CatalogueField,
}

impl Validator {
    /// Check `value`, returning the coerced value or the reason it failed.
    pub fn coerce(
        self,
        catalogue: &dyn FieldCatalogue,
        value: &ParamValue,
    ) -> std::result::Result<ParamValue, String> {
        match self {
            Validator::OneOf(literals) => {
                if literals.iter().any(|l| l.matches(value)) {
                    Ok(value.clone())
                } else {
                    let allowed: Vec<String> = literals.iter().map(ToString::to_string).collect();
                    Err(format!("must be one of: {}", allowed.join(", ")))
                }
            }
            Validator::Str => match value {
                ParamValue::List(_) => Err("expected a single string".to_string()),
                other => Ok(ParamValue::Str(other.to_string())),
            },
            Validator::Int => coerce_int(value).map(ParamValue::Int),
            Validator::NonNegativeInt => match coerce_int(value)? {
                i if i >= 0 => Ok(ParamValue::Int(i)),
                _ => Err("must be 0 or greater".to_string()),
            },
            Validator::Float => match value {
                ParamValue::Int(i) => Ok(ParamValue::Float(*i as f64)),
                ParamValue::Float(f) if f.is_finite() => Ok(ParamValue::Float(*f)),
                ParamValue::Str(s) => match s.trim().parse::<f64>() {
                    Ok(f) if f.is_finite() => Ok(ParamValue::Float(f)),
                    _ => Err("expected a number".to_string()),
                },
                _ => Err("expected a number".to_string()),
            },
            Validator::Bool => match value {
                ParamValue::Bool(b) => Ok(ParamValue::Bool(*b)),
                ParamValue::Int(0) => Ok(ParamValue::Bool(false)),
                ParamValue::Int(1) => Ok(ParamValue::Bool(true)),
                ParamValue::Str(s) => match s.to_ascii_lowercase().as_str() {
                    "true" | "on" | "yes" | "1" => Ok(ParamValue::Bool(true)),
                    "false" | "off" | "no" | "0" => Ok(ParamValue::Bool(false)),
                    _ => Err("expected a boolean".to_string()),
                },
                _ => Err("expected a boolean".to_string()),
            },
            Validator::CatalogueField => match value {
                ParamValue::Str(name) if catalogue.resolve(name).is_some() => Ok(value.clone()),
                _ => Err(format!("'{}' is not a field in the schema", value)),
            },
        }
    }
}

fn coerce_int(value: &ParamValue) -> std::result::Result<i64, String> {
    match value {
        ParamValue::Int(i) => Ok(*i),
        ParamValue::Float(f) => exact_i64(*f)
            .ok_or_else(|| "expected a whole number within the 64-bit integer range".to_string()),
        ParamValue::Str(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| "expected an integer".to_string()),
        _ => Err("expected an integer".to_string()),
    }
}

/// How the list of targeted fields is emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldList {
    /// One repeated parameter per field
    Repeated(&'static str),
    /// A single comma-separated parameter
    Joined(&'static str),
    None,
}

/// Static description of an option kind
#[derive(Debug, PartialEq)]
pub struct OptionKind {
    /// Parameter prefix and enable flag (`facet`, `hl`, `mlt`)
    pub name: &'static str,
    pub field_list: FieldList,
    pub allowed: &'static [(&'static str, Validator)],
}

impl OptionKind {
    pub fn validator(&self, key: &str) -> Option<Validator> {
        self.allowed
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, validator)| *validator)
    }

    /// Validate one option, failing with [`SearchError::InvalidOption`].
    pub fn validate(
        &self,
        catalogue: &dyn FieldCatalogue,
        key: &str,
        value: &ParamValue,
    ) -> Result<ParamValue> {
        let validator = self.validator(key).ok_or_else(|| {
            debug!(kind = self.name, key, "Unknown option rejected");
            SearchError::invalid_option(self.name, key, "no such option")
        })?;
        validator.coerce(catalogue, value).map_err(|reason| {
            debug!(kind = self.name, key, %value, %reason, "Option value rejected");
            SearchError::invalid_option(self.name, key, reason)
        })
    }
}

/// Named option values passed to an option set update.
///
/// ```rust
/// use solr_query::options::OptionArgs;
///
/// let args = OptionArgs::new().with("limit", 10).with("sort", "count");
/// assert_eq!(args.len(), 2);
///
/// let args = OptionArgs::from([("mincount", 1)]);
/// assert!(!args.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionArgs {
    values: Vec<(String, ParamValue)>,
}

impl OptionArgs {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.values.push((key.into(), value.into()));
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<ParamValue>, const N: usize> From<[(K, V); N]> for OptionArgs {
    fn from(values: [(K, V); N]) -> Self {
        values
            .into_iter()
            .fold(OptionArgs::new(), |args, (k, v)| args.with(k, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;

    const SORTS: &[Literal] = &[Literal::Bool(true), Literal::Bool(false), Literal::Str("count")];

    static KIND: OptionKind = OptionKind {
        name: "test",
        field_list: FieldList::None,
        allowed: &[("limit", Validator::Int), ("sort", Validator::OneOf(SORTS))],
    };

    fn coerce(validator: Validator, value: impl Into<ParamValue>) -> std::result::Result<ParamValue, String> {
        validator.coerce(&Schema::new().text("title"), &value.into())
    }

    #[test]
    fn test_one_of() {
        assert_eq!(coerce(Validator::OneOf(SORTS), true), Ok(ParamValue::Bool(true)));
        assert_eq!(coerce(Validator::OneOf(SORTS), "count"), Ok(ParamValue::from("count")));
        assert!(coerce(Validator::OneOf(SORTS), "index").unwrap_err().contains("count"));
    }

    #[test]
    fn test_int_coercion() {
        assert_eq!(coerce(Validator::Int, "12"), Ok(ParamValue::Int(12)));
        assert_eq!(coerce(Validator::Int, -3), Ok(ParamValue::Int(-3)));
        assert!(coerce(Validator::Int, "twelve").is_err());
        assert!(coerce(Validator::Int, 1.5).is_err());
    }

    #[test]
    fn test_int_coercion_rejects_out_of_range_floats() {
        assert!(coerce(Validator::Int, 1e19).unwrap_err().contains("64-bit"));
        assert!(coerce(Validator::NonNegativeInt, 1e19).is_err());
        assert!(coerce(Validator::Int, f64::NEG_INFINITY).is_err());
        assert_eq!(coerce(Validator::Int, 3.0), Ok(ParamValue::Int(3)));
    }

    #[test]
    fn test_non_negative_int_accepts_zero() {
        assert_eq!(coerce(Validator::NonNegativeInt, 0), Ok(ParamValue::Int(0)));
        assert!(coerce(Validator::NonNegativeInt, -1).is_err());
    }

    #[test]
    fn test_bool_and_float_coercion() {
        assert_eq!(coerce(Validator::Bool, "on"), Ok(ParamValue::Bool(true)));
        assert_eq!(coerce(Validator::Bool, 0), Ok(ParamValue::Bool(false)));
        assert!(coerce(Validator::Bool, "maybe").is_err());
        assert_eq!(coerce(Validator::Float, 2), Ok(ParamValue::Float(2.0)));
        assert_eq!(coerce(Validator::Float, "0.5"), Ok(ParamValue::Float(0.5)));
    }

    #[test]
    fn test_str_coercion() {
        assert_eq!(coerce(Validator::Str, 5), Ok(ParamValue::from("5")));
    }

    #[test]
    fn test_catalogue_field() {
        assert!(coerce(Validator::CatalogueField, "title").is_ok());
        assert!(coerce(Validator::CatalogueField, "body").is_err());
    }

    #[test]
    fn test_kind_validate_errors() {
        let schema = Schema::new();
        let err = KIND.validate(&schema, "nope", &ParamValue::Int(1)).unwrap_err();
        assert_eq!(err, SearchError::invalid_option("test", "nope", "no such option"));

        let err = KIND.validate(&schema, "limit", &"x".into()).unwrap_err();
        assert!(matches!(err, SearchError::InvalidOption { ref key, .. } if key == "limit"));
    }
}
