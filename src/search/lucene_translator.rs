// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Lucene Translator
//!
//! Translates a [`QueryNode`] tree to Lucene/Solr query syntax.
//!
//! # Lucene Query Syntax
//!
//! ```text
//! field:value               - Term
//! field:"some phrase"       - Phrase
//! field:[lo TO hi]          - Inclusive range
//! field:{lo TO hi}          - Exclusive range
//! field:[lo TO *]           - Open range
//! a AND b                   - Conjunction
//! a OR b                    - Disjunction
//! NOT a                     - Negation
//! a^2.5                     - Boost
//! (a OR b) AND c            - Grouping
//! ```
//!
//! Output is deterministic: clauses within a leaf are sorted by field name
//! and then by rendered value, so insertion order never matters.

use tracing::trace;

use super::query_builder::{LeafQuery, QueryNode, RangeBound, RangeClause, ValueSets};
use crate::error::Result;
use crate::params::{ParamValue, Params};
use crate::schema::{FieldCatalogue, FieldDescriptor};

/// Words the query parser treats as operators
const RESERVED_WORDS: [&str; 3] = ["AND", "NOT", "OR"];

/// Binary join of the enclosing expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Join {
    And,
    Or,
}

impl Join {
    fn separator(self) -> &'static str {
        match self {
            Join::And => " AND ",
            Join::Or => " OR ",
        }
    }
}

/// Lucene query translator
pub struct LuceneTranslator;

impl LuceneTranslator {
    /// Translate a query tree to Lucene syntax.
    ///
    /// Fails only if a field named in the tree has disappeared from the
    /// catalogue since the tree was built.
    pub fn translate(node: &QueryNode, catalogue: &dyn FieldCatalogue) -> Result<String> {
        let text = Self::translate_node(node, catalogue)?;
        trace!(query = %text, "Rendered query expression");
        Ok(text)
    }

    /// Translate a leaf to Lucene syntax.
    pub fn translate_leaf(leaf: &LeafQuery, catalogue: &dyn FieldCatalogue) -> Result<String> {
        let text = Self::render_leaf(leaf, catalogue)?;
        trace!(query = %text, "Rendered query expression");
        Ok(text)
    }

    /// `{flag: text}` for a non-empty leaf, nothing otherwise.
    pub fn leaf_options(
        leaf: &LeafQuery,
        catalogue: &dyn FieldCatalogue,
        flag: &str,
    ) -> Result<Params> {
        let mut opts = Params::new();
        let text = Self::translate_leaf(leaf, catalogue)?;
        if !text.is_empty() {
            opts.insert(flag.to_string(), ParamValue::Str(text));
        }
        Ok(opts)
    }

    fn translate_node(node: &QueryNode, catalogue: &dyn FieldCatalogue) -> Result<String> {
        match node {
            QueryNode::Leaf(leaf) => Self::render_leaf(leaf, catalogue),
            QueryNode::Or(left, right) => Self::render_join(left, right, Join::Or, catalogue),
            QueryNode::And(left, right) => Self::render_join(left, right, Join::And, catalogue),
            QueryNode::Not(inner) => match inner.as_ref() {
                // Double negation cancels out
                QueryNode::Not(operand) => Self::translate_node(operand, catalogue),
                operand => Ok(format!("NOT {}", Self::render_child(operand, None, catalogue)?)),
            },
            QueryNode::Boost(inner, factor) => Ok(format!(
                "{}^{}",
                Self::render_child(inner, None, catalogue)?,
                factor
            )),
        }
    }

    fn render_join(
        left: &QueryNode,
        right: &QueryNode,
        join: Join,
        catalogue: &dyn FieldCatalogue,
    ) -> Result<String> {
        Ok(format!(
            "{}{}{}",
            Self::render_child(left, Some(join), catalogue)?,
            join.separator(),
            Self::render_child(right, Some(join), catalogue)?
        ))
    }

    fn render_child(
        child: &QueryNode,
        join: Option<Join>,
        catalogue: &dyn FieldCatalogue,
    ) -> Result<String> {
        let text = Self::translate_node(child, catalogue)?;
        if Self::needs_parens(child, join) {
            Ok(format!("({})", text))
        } else {
            Ok(text)
        }
    }

    /// Whether `child` must be parenthesized inside `join` (or under a unary
    /// operator when `join` is `None`).
    fn needs_parens(child: &QueryNode, join: Option<Join>) -> bool {
        match effective(child) {
            QueryNode::Leaf(leaf) => leaf.clause_count() > 1,
            QueryNode::Not(_) | QueryNode::Boost(..) => false,
            QueryNode::Or(..) => join != Some(Join::Or),
            QueryNode::And(..) => join != Some(Join::And),
        }
    }

    fn render_leaf(leaf: &LeafQuery, catalogue: &dyn FieldCatalogue) -> Result<String> {
        let mut parts: Vec<String> = Vec::new();
        parts.extend(Self::render_value_sets(leaf.terms(), catalogue, render_term)?);
        parts.extend(Self::render_value_sets(leaf.phrases(), catalogue, render_phrase)?);
        parts.extend(leaf.ranges().iter().map(render_range));

        match (parts.is_empty(), leaf.subqueries()) {
            // Only one subquery: render it as-is and let the parent decide
            (true, [only]) => return Self::translate_node(only, catalogue),
            (_, subqueries) => {
                for subquery in subqueries {
                    parts.push(Self::render_child(subquery, Some(Join::And), catalogue)?);
                }
            }
        }
        Ok(parts.join(Join::And.separator()))
    }

    fn render_value_sets(
        sets: &ValueSets,
        catalogue: &dyn FieldCatalogue,
        render: fn(&FieldDescriptor, &str) -> String,
    ) -> Result<Vec<String>> {
        let mut parts = Vec::new();
        for (name, values) in sets {
            let field = match name {
                Some(name) => catalogue.require(name)?,
                None => catalogue.default_field(),
            };
            let mut rendered: Vec<String> = values.iter().map(|v| render(field, v)).collect();
            rendered.sort();
            match name {
                Some(name) => parts.extend(rendered.into_iter().map(|v| format!("{}:{}", name, v))),
                None => parts.extend(rendered),
            }
        }
        Ok(parts)
    }
}

/// Look through double negations and lone-subquery leaves to the node that
/// will actually be rendered.
fn effective(node: &QueryNode) -> &QueryNode {
    let mut current = node;
    loop {
        current = match current {
            QueryNode::Not(inner) => match inner.as_ref() {
                QueryNode::Not(operand) => operand.as_ref(),
                _ => return current,
            },
            QueryNode::Leaf(leaf) if leaf.terms().is_empty()
                && leaf.phrases().is_empty()
                && leaf.ranges().is_empty()
                && leaf.subqueries().len() == 1 =>
            {
                &leaf.subqueries()[0]
            }
            _ => return current,
        };
    }
}

fn render_term(field: &FieldDescriptor, value: &str) -> String {
    if field.is_text_typed() {
        escape_term(value)
    } else {
        value.to_string()
    }
}

fn render_phrase(field: &FieldDescriptor, value: &str) -> String {
    if field.is_text_typed() {
        format!("\"{}\"", escape_phrase(value))
    } else {
        format!("\"{}\"", value)
    }
}

fn render_range(clause: &RangeClause) -> String {
    let range = match &clause.bound {
        RangeBound::Lt(v) => format!("{{* TO {}}}", v),
        RangeBound::Lte(v) => format!("[* TO {}]", v),
        RangeBound::Gt(v) => format!("{{{} TO *}}", v),
        RangeBound::Gte(v) => format!("[{} TO *]", v),
        RangeBound::RangeExc(lo, hi) => format!("{{{} TO {}}}", lo, hi),
        RangeBound::Range(lo, hi) => format!("[{} TO {}]", lo, hi),
    };
    format!("{}:{}", clause.field, range)
}

/// Escape Lucene special characters in a bare term.
///
/// A term spelling an operator keyword is quoted instead.
pub fn escape_term(value: &str) -> String {
    if RESERVED_WORDS.contains(&value) {
        return format!("\"{}\"", value);
    }
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '+' | '-' | '&' | '|' | '!' | '(' | ')' | '{' | '}' | '[' | ']' | '^' | '"' | '~'
            | '*' | '?' | ':' | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escape the inside of a quoted phrase: only `\` and `"` are special.
pub fn escape_phrase(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
