// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Search request builder.
//!
//! A [`SearchRequest`] gathers a primary query (`q`), a filter query (`fq`)
//! and the option sets, then flattens them into one [`Params`] map.
//!
//! Every mutator works on a copy: the receiver is never changed, and a
//! failed call returns an error without producing a half-updated request.
//!
//! # Example
//!
//! ```rust
//! use solr_query::{Criteria, Schema, SearchRequest};
//!
//! let schema = Schema::new().text("name").text("status").int("age");
//! let request = SearchRequest::with_schema(schema)
//!     .query(Criteria::new().field("name", "fred").field("age__gte", 30))?
//!     .query(Criteria::new().field("status", "active"))?
//!     .paginate(Some(0), Some(10))?
//!     .sort_by("-score")?;
//!
//! assert_eq!(
//!     request.query_string()?.as_deref(),
//!     Some("name:fred AND status:active AND age:[30 TO *]")
//! );
//! # Ok::<(), solr_query::SearchError>(())
//! ```

use std::sync::Arc;

use tracing::debug;

use crate::error::{Result, SearchError};
use crate::options::{
    FieldOptions, MoreLikeThisOptions, OptionArgs, PaginateOptions, SortOptions,
};
use crate::params::{flatten, Params};
use crate::schema::{FieldCatalogue, Schema};
use crate::search::{ClauseKind, Criteria, LeafQuery, LuceneTranslator, QueryNode};

/// Immutable-style builder for a Solr search request.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    catalogue: Arc<dyn FieldCatalogue>,
    query: LeafQuery,
    filter: LeafQuery,
    paginator: PaginateOptions,
    more_like_this: MoreLikeThisOptions,
    highlighter: FieldOptions,
    faceter: FieldOptions,
    sorter: SortOptions,
}

impl SearchRequest {
    pub fn new(catalogue: Arc<dyn FieldCatalogue>) -> Self {
        Self {
            catalogue,
            query: LeafQuery::new(),
            filter: LeafQuery::new(),
            paginator: PaginateOptions::new(),
            more_like_this: MoreLikeThisOptions::new(),
            highlighter: FieldOptions::highlight(),
            faceter: FieldOptions::facet(),
            sorter: SortOptions::new(),
        }
    }

    pub fn with_schema(schema: Schema) -> Self {
        Self::new(Arc::new(schema))
    }

    pub fn catalogue(&self) -> &dyn FieldCatalogue {
        self.catalogue.as_ref()
    }

    /// The primary (`q`) expression
    pub fn primary(&self) -> &LeafQuery {
        &self.query
    }

    /// The filter (`fq`) expression
    pub fn filter_query(&self) -> &LeafQuery {
        &self.filter
    }

    /// Build a free-standing expression against this request's catalogue,
    /// for combining with [`QueryNode::and`], [`QueryNode::or`] and friends.
    pub fn q(&self, criteria: Criteria) -> Result<QueryNode> {
        QueryNode::leaf(self.catalogue(), criteria)
    }

    /// Clone, apply `f` to the clone, hand the clone back.
    fn update<F>(&self, f: F) -> Result<Self>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let mut next = self.clone();
        f(&mut next)?;
        Ok(next)
    }

    pub fn query(&self, criteria: Criteria) -> Result<Self> {
        self.update(|r| r.query.add(r.catalogue.as_ref(), criteria))
    }

    /// Like [`query`](Self::query), matching every text value as a bare term
    pub fn query_by_term(&self, criteria: Criteria) -> Result<Self> {
        self.query(criteria.force(ClauseKind::Term))
    }

    /// Like [`query`](Self::query), matching every text value as a phrase
    pub fn query_by_phrase(&self, criteria: Criteria) -> Result<Self> {
        self.query(criteria.force(ClauseKind::Phrase))
    }

    /// Build an operand for a combinator, refusing one that renders to
    /// nothing (`NOT ` or `^2` alone are not valid query text).
    fn operand(&self, criteria: Criteria, operation: &str) -> Result<QueryNode> {
        let node = self.q(criteria)?;
        if LuceneTranslator::translate(&node, self.catalogue())?.is_empty() {
            debug!(operation, "Empty operand rejected");
            return Err(SearchError::InvalidArgument(format!(
                "{} needs at least one clause",
                operation
            )));
        }
        Ok(node)
    }

    /// Require documents NOT to match `criteria`.
    pub fn exclude(&self, criteria: Criteria) -> Result<Self> {
        let negated = self.operand(criteria, "exclude")?.negate();
        self.query(Criteria::from(negated))
    }

    pub fn filter(&self, criteria: Criteria) -> Result<Self> {
        self.update(|r| r.filter.add(r.catalogue.as_ref(), criteria))
    }

    pub fn filter_by_term(&self, criteria: Criteria) -> Result<Self> {
        self.filter(criteria.force(ClauseKind::Term))
    }

    pub fn filter_by_phrase(&self, criteria: Criteria) -> Result<Self> {
        self.filter(criteria.force(ClauseKind::Phrase))
    }

    pub fn filter_exclude(&self, criteria: Criteria) -> Result<Self> {
        let negated = self.operand(criteria, "filter_exclude")?.negate();
        self.filter(Criteria::from(negated))
    }

    pub fn facet_by(&self, fields: &[&str], options: impl Into<OptionArgs>) -> Result<Self> {
        let options = options.into();
        self.update(|r| r.faceter.update(r.catalogue.as_ref(), fields, options))
    }

    pub fn highlight(&self, fields: &[&str], options: impl Into<OptionArgs>) -> Result<Self> {
        let options = options.into();
        self.update(|r| r.highlighter.update(r.catalogue.as_ref(), fields, options))
    }

    /// Request similar documents based on `fields`, optionally weighting
    /// some of them through `query_fields`.
    pub fn mlt(
        &self,
        fields: &[&str],
        query_fields: &[(&str, Option<f64>)],
        options: impl Into<OptionArgs>,
    ) -> Result<Self> {
        let options = options.into();
        self.update(|r| {
            r.more_like_this
                .update(r.catalogue.as_ref(), fields, query_fields, options)
        })
    }

    pub fn paginate(&self, start: Option<i64>, rows: Option<i64>) -> Result<Self> {
        self.update(|r| r.paginator.update(start, rows))
    }

    /// Append a sort key: `name`, `+name` (ascending) or `-name` (descending).
    pub fn sort_by(&self, field: &str) -> Result<Self> {
        self.update(|r| r.sorter.update(r.catalogue.as_ref(), field))
    }

    /// Rank documents matching `criteria` higher without changing which
    /// documents match.
    ///
    /// The primary expression `Q` becomes `Q OR (Q AND boosted^score)`, so
    /// the match set is exactly that of `Q`.
    pub fn boost_relevancy(&self, score: f64, criteria: Criteria) -> Result<Self> {
        if self.query.is_empty() {
            debug!("Relevancy boost on an empty query rejected");
            return Err(SearchError::EmptyQuery);
        }
        let boosted = self.operand(criteria, "boost_relevancy")?.boost(score)?;

        let original = Arc::new(QueryNode::Leaf(self.query.clone()));
        let with_boost = QueryNode::And(Arc::clone(&original), Arc::new(boosted));
        let combined = QueryNode::Or(original, Arc::new(with_boost));

        let mut next = self.clone();
        next.query = LeafQuery::from_subquery(combined);
        Ok(next)
    }

    /// Flat parameter map for the whole request.
    #[tracing::instrument(skip_all)]
    pub fn options(&self) -> Result<Params> {
        let catalogue = self.catalogue();
        let mut opts = Params::new();
        opts.extend(LuceneTranslator::leaf_options(&self.query, catalogue, "q")?);
        opts.extend(LuceneTranslator::leaf_options(&self.filter, catalogue, "fq")?);
        opts.extend(self.paginator.options());
        opts.extend(self.more_like_this.options());
        opts.extend(self.highlighter.options());
        opts.extend(self.faceter.options());
        opts.extend(self.sorter.options());
        debug!(count = opts.len(), "Assembled search parameters");
        Ok(opts)
    }

    /// [`options`](Self::options) as `(name, value)` pairs, with list values
    /// repeated once per element.
    pub fn params(&self) -> Result<Vec<(String, String)>> {
        Ok(flatten(&self.options()?))
    }

    /// Rendered primary query, if there is one.
    pub fn query_string(&self) -> Result<Option<String>> {
        let text = LuceneTranslator::translate_leaf(&self.query, self.catalogue())?;
        Ok(Some(text).filter(|t| !t.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamValue;
    use crate::schema::FieldKind;

    fn request() -> SearchRequest {
        SearchRequest::with_schema(
            Schema::new()
                .text("name")
                .text("status")
                .text("body")
                .int("age")
                .string("category")
                .multi_valued("tags", FieldKind::String),
        )
    }

    #[test]
    fn test_empty_request_has_no_params() {
        assert!(request().options().unwrap().is_empty());
        assert_eq!(request().query_string().unwrap(), None);
    }

    #[test]
    fn test_mutators_leave_receiver_untouched() {
        let base = request();
        let next = base.query(Criteria::new().field("name", "fred")).unwrap();

        assert!(base.primary().is_empty());
        assert_eq!(next.query_string().unwrap().as_deref(), Some("name:fred"));
    }

    #[test]
    fn test_failed_mutation_returns_error_only() {
        let base = request().query(Criteria::new().field("name", "fred")).unwrap();
        let err = base
            .query(Criteria::new().field("status", "x").field("colour", "red"))
            .unwrap_err();
        assert_eq!(err, SearchError::UnknownField("colour".to_string()));
        assert_eq!(base.query_string().unwrap().as_deref(), Some("name:fred"));
    }

    #[test]
    fn test_chained_queries_merge_into_one_leaf() {
        let req = request()
            .query(Criteria::new().field("name", "fred").field("age__gte", 30))
            .unwrap()
            .query(Criteria::new().field("status", "active"))
            .unwrap();
        assert_eq!(
            req.query_string().unwrap().as_deref(),
            Some("name:fred AND status:active AND age:[30 TO *]")
        );
    }

    #[test]
    fn test_exclude() {
        let req = request()
            .query(Criteria::new().field("name", "fred"))
            .unwrap()
            .exclude(Criteria::new().field("status", "banned"))
            .unwrap();
        assert_eq!(
            req.query_string().unwrap().as_deref(),
            Some("name:fred AND NOT status:banned")
        );
    }

    #[test]
    fn test_exclude_multi_clause_is_grouped() {
        let req = request()
            .exclude(Criteria::new().field("status", "banned").field("age__lt", 18))
            .unwrap();
        assert_eq!(
            req.query_string().unwrap().as_deref(),
            Some("NOT (status:banned AND age:{* TO 18})")
        );
    }

    #[test]
    fn test_filter_and_filter_exclude() {
        let req = request()
            .query(Criteria::new().value("hello"))
            .unwrap()
            .filter(Criteria::new().field("category", "books"))
            .unwrap()
            .filter_exclude(Criteria::new().field("tags", "draft"))
            .unwrap();

        let opts = req.options().unwrap();
        assert_eq!(opts["q"], ParamValue::from("hello"));
        assert_eq!(opts["fq"], ParamValue::from("category:books AND NOT tags:draft"));
    }

    #[test]
    fn test_forced_clause_kinds() {
        let by_term = request()
            .query_by_term(Criteria::new().field("name", "fred-flintstone"))
            .unwrap();
        assert_eq!(
            by_term.query_string().unwrap().as_deref(),
            Some("name:fred\\-flintstone")
        );

        let by_phrase = request()
            .filter_by_phrase(Criteria::new().field("name", "fred"))
            .unwrap();
        assert_eq!(by_phrase.options().unwrap()["fq"], ParamValue::from("name:\"fred\""));
    }

    #[test]
    fn test_boost_relevancy() {
        let req = request()
            .query(Criteria::new().field("name", "fred"))
            .unwrap()
            .boost_relevancy(2.0, Criteria::new().field("status", "active"))
            .unwrap();
        assert_eq!(
            req.query_string().unwrap().as_deref(),
            Some("name:fred OR (name:fred AND status:active^2)")
        );
    }

    #[test]
    fn test_boost_relevancy_multi_clause_original() {
        let req = request()
            .query(Criteria::new().field("name", "fred").field("status", "active"))
            .unwrap()
            .boost_relevancy(1.5, Criteria::new().field("age__gt", 40))
            .unwrap();
        assert_eq!(
            req.query_string().unwrap().as_deref(),
            Some(
                "(name:fred AND status:active) OR \
                 ((name:fred AND status:active) AND age:{40 TO *}^1.5)"
            )
        );
    }

    #[test]
    fn test_boost_relevancy_errors() {
        assert_eq!(
            request()
                .boost_relevancy(2.0, Criteria::new().field("name", "fred"))
                .unwrap_err(),
            SearchError::EmptyQuery
        );

        let req = request().query(Criteria::new().field("name", "fred")).unwrap();
        assert!(matches!(
            req.boost_relevancy(-1.0, Criteria::new().field("status", "x")),
            Err(SearchError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_empty_operands_rejected() {
        let base = request().query(Criteria::new().field("name", "fred")).unwrap();
        let empty_subquery = Criteria::new().query(base.q(Criteria::new()).unwrap());

        for result in [
            base.exclude(Criteria::new()),
            base.exclude(empty_subquery.clone()),
            base.filter_exclude(Criteria::new()),
            base.boost_relevancy(2.0, Criteria::new()),
            base.boost_relevancy(2.0, empty_subquery),
        ] {
            assert!(matches!(result, Err(SearchError::InvalidArgument(_))));
        }
        assert_eq!(base.query_string().unwrap().as_deref(), Some("name:fred"));
        assert!(base.options().unwrap().get("fq").is_none());
    }

    #[test]
    fn test_q_combinators() {
        let req = request();
        let node = req
            .q(Criteria::new().field("name", "fred"))
            .unwrap()
            .or(req.q(Criteria::new().field("name", "wilma")).unwrap());
        let req = req.query(Criteria::from(node)).unwrap();
        assert_eq!(
            req.query_string().unwrap().as_deref(),
            Some("name:fred OR name:wilma")
        );
    }

    #[test]
    fn test_all_option_sets_merge() {
        let req = request()
            .query(Criteria::new().field("body", "rust"))
            .unwrap()
            .paginate(Some(0), Some(10))
            .unwrap()
            .facet_by(&["category"], [("mincount", 1)])
            .unwrap()
            .highlight(&["body"], OptionArgs::new())
            .unwrap()
            .mlt(&["body"], &[("body", Some(2.0))], OptionArgs::new())
            .unwrap()
            .sort_by("-score")
            .unwrap()
            .sort_by("name")
            .unwrap();

        let opts = req.options().unwrap();
        assert_eq!(opts["q"], ParamValue::from("body:rust"));
        assert_eq!(opts["start"], ParamValue::Int(0));
        assert_eq!(opts["rows"], ParamValue::Int(10));
        assert_eq!(opts["facet"], ParamValue::Bool(true));
        assert_eq!(opts["f.category.facet.mincount"], ParamValue::Int(1));
        assert_eq!(opts["hl.fl"], ParamValue::from("body"));
        assert_eq!(opts["mlt.qf"], ParamValue::from("body^2"));
        assert_eq!(opts["sort"], ParamValue::from("score desc, name asc"));
    }

    #[test]
    fn test_params_fan_out_lists() {
        let req = request().facet_by(&["category", "tags"], OptionArgs::new()).unwrap();
        let params = req.params().unwrap();
        assert_eq!(
            params,
            vec![
                ("facet".to_string(), "true".to_string()),
                ("facet.field".to_string(), "category".to_string()),
                ("facet.field".to_string(), "tags".to_string()),
            ]
        );
    }

    #[test]
    fn test_unique_key_visible_through_catalogue() {
        let req = SearchRequest::with_schema(Schema::new().string("id").with_unique_key("id"));
        assert_eq!(req.catalogue().unique_key(), Some("id"));
    }
}
