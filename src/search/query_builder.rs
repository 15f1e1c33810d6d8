// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Query Builder - boolean expression tree for Lucene queries
//!
//! A [`QueryNode`] is either a conjunctive [`LeafQuery`] of terms, phrases,
//! ranges and nested subqueries, or one boolean/weighting combinator over
//! other nodes. Combinators always build a new node; operands are never
//! mutated.
//!
//! # Example
//!
//! ```rust
//! use solr_query::schema::Schema;
//! use solr_query::search::{Criteria, LuceneTranslator, QueryNode};
//!
//! let schema = Schema::new().text("name").text("status").int("age");
//!
//! let adults = QueryNode::leaf(&schema, Criteria::new().field("age__gte", 18))?;
//! let named = QueryNode::leaf(&schema, Criteria::new().field("name", "fred"))?;
//! let query = named.or(adults).and(
//!     QueryNode::leaf(&schema, Criteria::new().field("status", "banned"))?.negate(),
//! );
//!
//! assert_eq!(
//!     LuceneTranslator::translate(&query, &schema)?,
//!     "(name:fred OR age:[18 TO *]) AND NOT status:banned"
//! );
//! # Ok::<(), solr_query::SearchError>(())
//! ```

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::debug;

use crate::error::{Result, SearchError};
use crate::schema::{FieldCatalogue, FieldValue};

/// Query expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum QueryNode {
    /// Implicit conjunction of clauses and subqueries
    Leaf(LeafQuery),
    /// Boolean OR: `a OR b`
    Or(Arc<QueryNode>, Arc<QueryNode>),
    /// Boolean AND: `a AND b`
    And(Arc<QueryNode>, Arc<QueryNode>),
    /// Boolean NOT: `NOT a`
    Not(Arc<QueryNode>),
    /// Relevancy weighting: `a^factor`
    Boost(Arc<QueryNode>, f64),
}

impl QueryNode {
    /// Build a leaf from criteria.
    pub fn leaf(catalogue: &dyn FieldCatalogue, criteria: Criteria) -> Result<Self> {
        let mut leaf = LeafQuery::new();
        leaf.add(catalogue, criteria)?;
        Ok(QueryNode::Leaf(leaf))
    }

    /// Combine with AND
    #[must_use]
    pub fn and(self, other: impl Into<QueryNode>) -> Self {
        QueryNode::And(Arc::new(self), Arc::new(other.into()))
    }

    /// Combine with OR
    #[must_use]
    pub fn or(self, other: impl Into<QueryNode>) -> Self {
        QueryNode::Or(Arc::new(self), Arc::new(other.into()))
    }

    /// Negate query
    #[must_use]
    pub fn negate(self) -> Self {
        QueryNode::Not(Arc::new(self))
    }

    /// Weight the query by `factor`, which must be a positive finite number.
    pub fn boost(self, factor: f64) -> Result<Self> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(SearchError::InvalidArgument(format!(
                "boost factor must be a positive number, got {}",
                factor
            )));
        }
        Ok(QueryNode::Boost(Arc::new(self), factor))
    }

    /// Like [`boost`](Self::boost), parsing the factor from text.
    pub fn boost_str(self, factor: &str) -> Result<Self> {
        let parsed = factor.trim().parse::<f64>().map_err(|_| {
            SearchError::InvalidArgument(format!("Non-numeric value supplied for boost: '{}'", factor))
        })?;
        self.boost(parsed)
    }

    /// A leaf with no clauses is empty; combinators never are.
    pub fn is_empty(&self) -> bool {
        match self {
            QueryNode::Leaf(leaf) => leaf.is_empty(),
            _ => false,
        }
    }

    /// True for a leaf holding exactly one clause.
    pub fn is_single_clause(&self) -> bool {
        matches!(self, QueryNode::Leaf(leaf) if leaf.is_single_clause())
    }
}

impl From<LeafQuery> for QueryNode {
    fn from(leaf: LeafQuery) -> Self {
        QueryNode::Leaf(leaf)
    }
}

/// Relation of a range clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RangeRelation {
    Gt,
    Gte,
    Lt,
    Lte,
    /// Inclusive on both ends: `[lo TO hi]`
    Range,
    /// Exclusive on both ends: `{lo TO hi}`
    RangeExc,
}

impl RangeRelation {
    pub fn as_str(self) -> &'static str {
        match self {
            RangeRelation::Gt => "gt",
            RangeRelation::Gte => "gte",
            RangeRelation::Lt => "lt",
            RangeRelation::Lte => "lte",
            RangeRelation::Range => "range",
            RangeRelation::RangeExc => "rangeexc",
        }
    }
}

impl fmt::Display for RangeRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RangeRelation {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "gt" => Ok(RangeRelation::Gt),
            "gte" => Ok(RangeRelation::Gte),
            "lt" => Ok(RangeRelation::Lt),
            "lte" => Ok(RangeRelation::Lte),
            "range" => Ok(RangeRelation::Range),
            "rangeexc" => Ok(RangeRelation::RangeExc),
            _ => Err(SearchError::InvalidArgument(format!(
                "No such relation '{}' defined",
                s
            ))),
        }
    }
}

/// Serialized bound(s) of a range clause, tagged with their relation.
///
/// Variants are declared in [`RangeRelation`] order so clauses sort the same
/// way by either.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RangeBound {
    Gt(String),
    Gte(String),
    Lt(String),
    Lte(String),
    /// `lo <= hi` in the field's order
    Range(String, String),
    /// `lo <= hi` in the field's order
    RangeExc(String, String),
}

impl RangeBound {
    pub fn relation(&self) -> RangeRelation {
        match self {
            RangeBound::Gt(_) => RangeRelation::Gt,
            RangeBound::Gte(_) => RangeRelation::Gte,
            RangeBound::Lt(_) => RangeRelation::Lt,
            RangeBound::Lte(_) => RangeRelation::Lte,
            RangeBound::Range(..) => RangeRelation::Range,
            RangeBound::RangeExc(..) => RangeRelation::RangeExc,
        }
    }
}

/// One range clause: `field:[lo TO hi]` and friends
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RangeClause {
    pub field: String,
    pub bound: RangeBound,
}

/// How an exact-match value is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseKind {
    /// Bare token: `field:value`
    Term,
    /// Quoted: `field:"some value"`
    Phrase,
}

impl ClauseKind {
    /// Word-character values are terms; anything else is a phrase.
    pub fn classify(value: &str) -> Self {
        if !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            ClauseKind::Term
        } else {
            ClauseKind::Phrase
        }
    }
}

/// Map from field name (`None` = default field) to exact-match values
pub type ValueSets = BTreeMap<Option<String>, BTreeSet<String>>;

/// Conjunctive leaf: every clause and subquery must match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeafQuery {
    terms: ValueSets,
    phrases: ValueSets,
    ranges: BTreeSet<RangeClause>,
    subqueries: Vec<QueryNode>,
}

impl LeafQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// A leaf holding a single subquery.
    pub fn from_subquery(node: QueryNode) -> Self {
        Self {
            subqueries: vec![node],
            ..Self::default()
        }
    }

    pub fn terms(&self) -> &ValueSets {
        &self.terms
    }

    pub fn phrases(&self) -> &ValueSets {
        &self.phrases
    }

    pub fn ranges(&self) -> &BTreeSet<RangeClause> {
        &self.ranges
    }

    pub fn subqueries(&self) -> &[QueryNode] {
        &self.subqueries
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
            && self.phrases.is_empty()
            && self.ranges.is_empty()
            && self.subqueries.is_empty()
    }

    /// Total number of clauses across terms, phrases, ranges and subqueries.
    pub fn clause_count(&self) -> usize {
        let values = |sets: &ValueSets| sets.values().map(BTreeSet::len).sum::<usize>();
        values(&self.terms) + values(&self.phrases) + self.ranges.len() + self.subqueries.len()
    }

    pub fn is_single_clause(&self) -> bool {
        self.clause_count() == 1
    }

    /// Add criteria to this leaf.
    ///
    /// Either every value and constraint is added, or (on error) the leaf is
    /// left exactly as it was.
    pub fn add(&mut self, catalogue: &dyn FieldCatalogue, criteria: Criteria) -> Result<()> {
        let mut staged = self.clone();
        if let Err(e) = staged.apply(catalogue, criteria) {
            debug!(error = %e, "Query criteria rejected");
            return Err(e);
        }
        *self = staged;
        Ok(())
    }

    fn apply(&mut self, catalogue: &dyn FieldCatalogue, criteria: Criteria) -> Result<()> {
        let force = criteria.force;

        for positional in criteria.values {
            match positional {
                Positional::Query(node) => self.subqueries.push(node),
                Positional::Value(value) => self.add_exact(catalogue, None, &value, force)?,
            }
        }

        for (key, value) in criteria.constraints {
            let (field_name, relation) = split_constraint(&key);
            catalogue.require(field_name)?;
            if relation == "eq" {
                self.add_exact(catalogue, Some(field_name), &value, force)?;
            } else {
                let relation = relation.parse::<RangeRelation>()?;
                self.add_range(catalogue, field_name, relation, &value)?;
            }
        }
        Ok(())
    }

    fn add_exact(
        &mut self,
        catalogue: &dyn FieldCatalogue,
        field_name: Option<&str>,
        value: &FieldValue,
        force: Option<ClauseKind>,
    ) -> Result<()> {
        let field = match field_name {
            Some(name) => catalogue.require(name)?,
            None => catalogue.default_field(),
        };

        // Might be multi-valued
        for value in field.serialize(value)?.into_vec() {
            let kind = if field.is_text_typed() {
                force.unwrap_or_else(|| ClauseKind::classify(&value))
            } else {
                ClauseKind::Term
            };
            let sets = match kind {
                ClauseKind::Term => &mut self.terms,
                ClauseKind::Phrase => &mut self.phrases,
            };
            sets.entry(field_name.map(str::to_string))
                .or_default()
                .insert(value);
        }
        Ok(())
    }

    fn add_range(
        &mut self,
        catalogue: &dyn FieldCatalogue,
        field_name: &str,
        relation: RangeRelation,
        value: &FieldValue,
    ) -> Result<()> {
        let field = catalogue.require(field_name)?;
        if field.is_boolean_typed() {
            return Err(SearchError::UnsupportedOperation(format!(
                "Cannot do a '{}' query on a bool field",
                relation
            )));
        }

        let bound = match relation {
            RangeRelation::Gt => RangeBound::Gt(field.serialize_scalar(value)?),
            RangeRelation::Gte => RangeBound::Gte(field.serialize_scalar(value)?),
            RangeRelation::Lt => RangeBound::Lt(field.serialize_scalar(value)?),
            RangeRelation::Lte => RangeBound::Lte(field.serialize_scalar(value)?),
            RangeRelation::Range | RangeRelation::RangeExc => {
                let (lo, hi) = match value {
                    FieldValue::List(items) if items.len() == 2 => (&items[0], &items[1]),
                    _ => {
                        return Err(SearchError::InvalidArgument(format!(
                            "'{}__{}' argument must be a length-2 list",
                            field_name, relation
                        )))
                    }
                };
                let mut lo = field.serialize_scalar(lo)?;
                let mut hi = field.serialize_scalar(hi)?;
                if field.compare_serialized(&lo, &hi) == Ordering::Greater {
                    std::mem::swap(&mut lo, &mut hi);
                }
                if relation == RangeRelation::Range {
                    RangeBound::Range(lo, hi)
                } else {
                    RangeBound::RangeExc(lo, hi)
                }
            }
        };

        self.ranges.insert(RangeClause {
            field: field_name.to_string(),
            bound,
        });
        Ok(())
    }
}

/// Split `field__relation` into its parts; a bare field means `eq`.
fn split_constraint(key: &str) -> (&str, &str) {
    let mut parts = key.split("__");
    match (parts.next(), parts.next(), parts.next()) {
        (Some(field), Some(relation), None) => (field, relation),
        _ => (key, "eq"),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Positional {
    Value(FieldValue),
    Query(QueryNode),
}

/// Values and field constraints to add to a leaf.
///
/// - [`value`](Self::value) matches against the default field
/// - [`field`](Self::field) takes `name` for an exact match or
///   `name__relation` (`lt`, `lte`, `gt`, `gte`, `range`, `rangeexc`) for a
///   range
/// - [`query`](Self::query) embeds another expression as a subquery
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    values: Vec<Positional>,
    constraints: Vec<(String, FieldValue)>,
    force: Option<ClauseKind>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an exact match against the default field
    #[must_use]
    pub fn value(mut self, value: impl Into<FieldValue>) -> Self {
        self.values.push(Positional::Value(value.into()));
        self
    }

    /// Add a nested subquery
    #[must_use]
    pub fn query(mut self, node: impl Into<QueryNode>) -> Self {
        self.values.push(Positional::Query(node.into()));
        self
    }

    /// Add a `field` or `field__relation` constraint
    #[must_use]
    pub fn field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.constraints.push((key.into(), value.into()));
        self
    }

    /// Render every text value as a term or as a phrase, skipping the heuristic
    #[must_use]
    pub fn force(mut self, kind: ClauseKind) -> Self {
        self.force = Some(kind);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.constraints.is_empty()
    }
}

impl From<QueryNode> for Criteria {
    fn from(node: QueryNode) -> Self {
        Criteria::new().query(node)
    }
}
