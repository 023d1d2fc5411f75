//! Boolean filter expressions over indexed documents.
//!
//! The document-index collaborator consumes queries as data: an immutable
//! tagged tree of predicates combined through boolean clause groups. This
//! module defines that tree and its construction helpers; [`compose`]
//! builds the lookup-driven filter described in the crate docs.
//!
//! ## Match semantics
//!
//! A [`BoolFilter`] matches a document when all three hold:
//!
//! - every `must` clause matches,
//! - no `must_not` clause matches,
//! - the `should` group is empty, or at least one `should` clause matches.
//!
//! A bool filter with no clauses at all therefore **matches everything**.
//! Callers that need to distinguish "no filtering applies" from "filter
//! rejects all documents" use [`FilterExpression::is_unconstrained`].

mod compose;

pub use compose::compose;

use serde::{Deserialize, Serialize};

use crate::lookup::ConceptId;

/// A value compared against a document field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TermValue {
    /// A concept identifier.
    Id(ConceptId),
    /// A keyword value, e.g. a branch path.
    Keyword(String),
}

impl From<ConceptId> for TermValue {
    fn from(id: ConceptId) -> Self {
        TermValue::Id(id)
    }
}

impl From<&str> for TermValue {
    fn from(keyword: &str) -> Self {
        TermValue::Keyword(keyword.to_string())
    }
}

impl From<String> for TermValue {
    fn from(keyword: String) -> Self {
        TermValue::Keyword(keyword)
    }
}

/// Exact-value predicate over a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// Document field to compare.
    pub field: String,
    /// Value the field must hold.
    pub value: TermValue,
}

/// Membership predicate over a single field, values supplied inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Terms {
    /// Document field to compare.
    pub field: String,
    /// Matching values; the field must hold at least one.
    pub values: Vec<TermValue>,
}

/// Membership predicate whose values live in another document.
///
/// The engine resolves the reference server-side: it reads field `path` of
/// document `id` in `index` and matches when the evaluated document's
/// `field` holds any of those values. The member list is never inlined
/// into the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermsLookup {
    /// Document field to compare.
    pub field: String,
    /// Index holding the referenced document.
    pub index: String,
    /// Identity of the referenced document.
    pub id: String,
    /// Field of the referenced document holding the values.
    pub path: String,
}

/// Boolean combination of clause groups.
///
/// See the module docs for match semantics; an empty combinator matches
/// everything.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoolFilter {
    /// Clauses that must all match.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub must: Vec<FilterExpression>,
    /// Clauses of which at least one must match, when any are present.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub should: Vec<FilterExpression>,
    /// Clauses that must not match.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub must_not: Vec<FilterExpression>,
}

impl BoolFilter {
    /// Creates an empty combinator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `must` clause.
    pub fn must(mut self, clause: FilterExpression) -> Self {
        self.must.push(clause);
        self
    }

    /// Adds a `should` clause.
    pub fn should(mut self, clause: FilterExpression) -> Self {
        self.should.push(clause);
        self
    }

    /// Adds a `must_not` clause.
    pub fn must_not(mut self, clause: FilterExpression) -> Self {
        self.must_not.push(clause);
        self
    }

    /// True when no clause group holds any clause.
    pub fn is_empty(&self) -> bool {
        self.must.is_empty() && self.should.is_empty() && self.must_not.is_empty()
    }
}

impl From<BoolFilter> for FilterExpression {
    fn from(bool_filter: BoolFilter) -> Self {
        FilterExpression::Bool(bool_filter)
    }
}

/// A node of the filter expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterExpression {
    /// Exact-value predicate.
    Term(Term),
    /// Inline membership predicate.
    Terms(Terms),
    /// Indirect membership predicate, resolved by document identity.
    TermsLookup(TermsLookup),
    /// Boolean combination.
    Bool(BoolFilter),
}

impl FilterExpression {
    /// Exact-value predicate on `field`.
    pub fn term(field: impl Into<String>, value: impl Into<TermValue>) -> Self {
        FilterExpression::Term(Term {
            field: field.into(),
            value: value.into(),
        })
    }

    /// Inline membership predicate on `field`.
    pub fn terms<V, I>(field: impl Into<String>, values: I) -> Self
    where
        V: Into<TermValue>,
        I: IntoIterator<Item = V>,
    {
        FilterExpression::Terms(Terms {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        })
    }

    /// Indirect membership predicate on `field`, reading `path` of document
    /// `id` in `index`.
    pub fn terms_lookup(
        field: impl Into<String>,
        index: impl Into<String>,
        id: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        FilterExpression::TermsLookup(TermsLookup {
            field: field.into(),
            index: index.into(),
            id: id.into(),
            path: path.into(),
        })
    }

    /// An expression with no constraints; matches every document.
    pub fn match_all() -> Self {
        FilterExpression::Bool(BoolFilter::new())
    }

    /// True when this expression carries no constraining clauses.
    ///
    /// Only an empty boolean combinator is unconstrained; any predicate
    /// node constrains.
    pub fn is_unconstrained(&self) -> bool {
        matches!(self, FilterExpression::Bool(b) if b.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_all_is_unconstrained() {
        assert!(FilterExpression::match_all().is_unconstrained());
        assert!(FilterExpression::Bool(BoolFilter::new()).is_unconstrained());
    }

    #[test]
    fn test_predicates_are_constrained() {
        assert!(!FilterExpression::term("path", "MAIN").is_unconstrained());
        assert!(!FilterExpression::terms("refsetId", [100001u64]).is_unconstrained());
        assert!(!FilterExpression::terms_lookup("destination", "lookups", "l1", "conceptIds")
            .is_unconstrained());
    }

    #[test]
    fn test_bool_with_clauses_is_constrained() {
        let filter: FilterExpression = BoolFilter::new()
            .must(FilterExpression::term("path", "MAIN"))
            .into();
        assert!(!filter.is_unconstrained());
    }

    #[test]
    fn test_bool_builder_groups_clauses() {
        let bool_filter = BoolFilter::new()
            .must(FilterExpression::term("path", "MAIN"))
            .should(FilterExpression::term("destination", 20u64))
            .must_not(FilterExpression::term("destination", 99u64));

        assert_eq!(bool_filter.must.len(), 1);
        assert_eq!(bool_filter.should.len(), 1);
        assert_eq!(bool_filter.must_not.len(), 1);
        assert!(!bool_filter.is_empty());
    }

    #[test]
    fn test_term_value_conversions() {
        assert_eq!(TermValue::from(100001u64), TermValue::Id(100001));
        assert_eq!(TermValue::from("MAIN"), TermValue::Keyword("MAIN".into()));
    }

    #[test]
    fn test_wire_shape() {
        let filter: FilterExpression = BoolFilter::new()
            .must_not(FilterExpression::terms_lookup(
                "destination",
                "concepts-lookup",
                "l1",
                "conceptIds",
            ))
            .into();

        let json = serde_json::to_value(&filter).unwrap();
        let clause = &json["bool"]["mustNot"][0]["termsLookup"];
        assert_eq!(clause["field"], "destination");
        assert_eq!(clause["index"], "concepts-lookup");
        assert_eq!(clause["id"], "l1");
        assert_eq!(clause["path"], "conceptIds");
    }
}
