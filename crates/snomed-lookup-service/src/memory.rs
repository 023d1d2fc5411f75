//! In-process reference implementation of the index contract.
//!
//! [`InMemoryLookupIndex`] keeps the lookup collection in an ordered map
//! and evaluates filter expressions directly, including server-side
//! resolution of terms-lookup indirection. It exists to pin the consumed
//! engine's semantics in executable form: the integration suites run the
//! full retrieve-compose-match cycle against it, and implementers of
//! [`ConceptLookupIndex`](crate::ConceptLookupIndex) can compare behavior
//! against it.
//!
//! Resolution conventions, matching the consumed engine:
//!
//! - a terms-lookup referencing a missing document resolves to an empty
//!   member list (no match), not an error;
//! - a terms-lookup naming a different index is unresolvable here and
//!   matches nothing;
//! - an empty boolean combinator matches every document.

use std::collections::{BTreeMap, HashMap};

use parking_lot::RwLock;
use snomed_lookup::{fields, ConceptSetLookup, FilterExpression, TermValue};

use crate::branch::PATH_FIELD;
use crate::error::IndexResult;
use crate::page::Page;
use crate::traits::{ConceptLookupIndex, LookupSearch, SourceFilter};

/// Branch path used when documents are saved without explicit scoping.
pub const DEFAULT_PATH: &str = "MAIN";

/// A flat field-to-values view of an indexed document, as the filter
/// evaluator sees it.
#[derive(Debug, Clone, Default)]
pub struct Document {
    fields: HashMap<String, Vec<TermValue>>,
}

impl Document {
    /// An empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single value under `field`.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<TermValue>) -> Self {
        self.fields
            .entry(field.into())
            .or_default()
            .push(value.into());
        self
    }

    /// Adds multiple values under `field`.
    pub fn with_values<V, I>(mut self, field: impl Into<String>, values: I) -> Self
    where
        V: Into<TermValue>,
        I: IntoIterator<Item = V>,
    {
        self.fields
            .entry(field.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// Values held under `field`; empty when the field is absent.
    pub fn values(&self, field: &str) -> &[TermValue] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    fn holds(&self, field: &str, value: &TermValue) -> bool {
        self.values(field).contains(value)
    }
}

#[derive(Debug, Clone)]
struct StoredLookup {
    lookup: ConceptSetLookup,
    path: String,
}

impl StoredLookup {
    /// The document view the evaluator matches against.
    fn as_document(&self) -> Document {
        let mut doc = Document::new()
            .with("id", self.lookup.id.as_str())
            .with(fields::REFSET_ID, self.lookup.refset_id)
            .with(PATH_FIELD, self.path.as_str());
        if let Some(members) = &self.lookup.member_ids {
            doc = doc.with_values(fields::CONCEPT_IDS, members.iter().copied());
        }
        doc
    }
}

/// An in-memory lookup index.
///
/// Documents are keyed by identity in insertion-independent order, which
/// gives the page cursor a stable iteration order. The map is guarded by
/// an `RwLock`; reads proceed concurrently, maintenance takes the write
/// lock but is otherwise unsynchronized against readers, matching the
/// contract of the real engine.
pub struct InMemoryLookupIndex {
    name: String,
    docs: RwLock<BTreeMap<String, StoredLookup>>,
}

impl InMemoryLookupIndex {
    /// An empty index with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            docs: RwLock::new(BTreeMap::new()),
        }
    }

    /// Saves lookups scoped to a branch path, overwriting by identity.
    ///
    /// The trait-level [`save_all`](ConceptLookupIndex::save_all) scopes to
    /// [`DEFAULT_PATH`]; version pipelines that materialize per-branch
    /// snapshots use this form.
    pub fn save_all_on_path(&self, path: &str, lookups: &[ConceptSetLookup]) {
        let mut docs = self.docs.write();
        for lookup in lookups {
            docs.insert(
                lookup.id.clone(),
                StoredLookup {
                    lookup: lookup.clone(),
                    path: path.to_string(),
                },
            );
        }
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.docs.read().len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.docs.read().is_empty()
    }

    /// Evaluates a filter against an arbitrary document, resolving
    /// terms-lookup references against the stored collection.
    pub fn matches(&self, filter: &FilterExpression, doc: &Document) -> bool {
        let docs = self.docs.read();
        eval(&docs, &self.name, filter, doc)
    }
}

fn eval(
    docs: &BTreeMap<String, StoredLookup>,
    index_name: &str,
    filter: &FilterExpression,
    doc: &Document,
) -> bool {
    match filter {
        FilterExpression::Term(term) => doc.holds(&term.field, &term.value),
        FilterExpression::Terms(terms) => {
            terms.values.iter().any(|v| doc.holds(&terms.field, v))
        }
        FilterExpression::TermsLookup(lookup) => {
            if lookup.index != index_name {
                return false;
            }
            let Some(stored) = docs.get(&lookup.id) else {
                return false;
            };
            let referenced = stored.as_document();
            referenced
                .values(&lookup.path)
                .iter()
                .any(|v| doc.holds(&lookup.field, v))
        }
        FilterExpression::Bool(b) => {
            let must = b.must.iter().all(|c| eval(docs, index_name, c, doc));
            let none_forbidden = !b.must_not.iter().any(|c| eval(docs, index_name, c, doc));
            let should = b.should.is_empty()
                || b.should.iter().any(|c| eval(docs, index_name, c, doc));
            must && none_forbidden && should
        }
    }
}

fn apply_source_filter(lookup: ConceptSetLookup, source: Option<&SourceFilter>) -> ConceptSetLookup {
    match source {
        Some(filter) if filter.excludes_field(fields::CONCEPT_IDS) => lookup.without_members(),
        _ => lookup,
    }
}

impl ConceptLookupIndex for InMemoryLookupIndex {
    fn index_name(&self) -> &str {
        &self.name
    }

    fn search_lookups(&self, search: &LookupSearch) -> IndexResult<Page<ConceptSetLookup>> {
        let docs = self.docs.read();
        let matched: Vec<&StoredLookup> = docs
            .values()
            .filter(|stored| eval(&docs, &self.name, &search.filter, &stored.as_document()))
            .collect();
        let total = matched.len() as u64;
        let hits = matched
            .into_iter()
            .skip(search.page.from)
            .take(search.page.size)
            .map(|stored| apply_source_filter(stored.lookup.clone(), search.source.as_ref()))
            .collect();
        Ok(Page::new(hits, total))
    }

    fn save_all(&self, lookups: &[ConceptSetLookup]) -> IndexResult<()> {
        self.save_all_on_path(DEFAULT_PATH, lookups);
        Ok(())
    }

    fn delete_all(&self) -> IndexResult<()> {
        self.docs.write().clear();
        Ok(())
    }
}
