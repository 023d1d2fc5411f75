//! Traits for the document-index collaborator.
//!
//! This module defines the [`ConceptLookupIndex`] trait that must be
//! implemented by whatever document-index client backs the lookup store.
//!
//! # Architecture Note
//!
//! This crate does not depend on any concrete index client. The trait is
//! defined here, implementations for real clients belong in the consuming
//! crate; [`InMemoryLookupIndex`](crate::InMemoryLookupIndex) is the
//! in-process reference implementation used by the test suites.
//!
//! # Example: implementing ConceptLookupIndex for a remote client
//!
//! ```ignore
//! use snomed_lookup::ConceptSetLookup;
//! use snomed_lookup_service::{ConceptLookupIndex, IndexResult, LookupSearch, Page};
//!
//! impl ConceptLookupIndex for MyIndexClient {
//!     fn index_name(&self) -> &str {
//!         "concepts-lookup"
//!     }
//!
//!     fn search_lookups(&self, search: &LookupSearch) -> IndexResult<Page<ConceptSetLookup>> {
//!         self.search(search.filter.clone(), &search.page)
//!     }
//!
//!     fn save_all(&self, lookups: &[ConceptSetLookup]) -> IndexResult<()> {
//!         self.bulk_save(lookups)
//!     }
//!
//!     fn delete_all(&self) -> IndexResult<()> {
//!         self.delete_by_query_all()
//!     }
//! }
//! ```

use snomed_lookup::{ConceptSetLookup, FilterExpression};

use crate::config::DEFAULT_PAGE_SIZE;
use crate::error::IndexResult;
use crate::page::{Page, PageRequest};

/// Restriction on which stored fields a search returns.
///
/// Retrieval uses this to omit the member payload, which can be tens of
/// thousands of identifiers per document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFilter {
    /// When non-empty, only these fields are returned.
    pub includes: Vec<String>,
    /// Fields never returned, regardless of `includes`.
    pub excludes: Vec<String>,
}

impl SourceFilter {
    /// A filter returning everything except the given fields.
    pub fn excluding<F, I>(fields: I) -> Self
    where
        F: Into<String>,
        I: IntoIterator<Item = F>,
    {
        Self {
            includes: Vec::new(),
            excludes: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// A filter returning only the given fields.
    pub fn including<F, I>(fields: I) -> Self
    where
        F: Into<String>,
        I: IntoIterator<Item = F>,
    {
        Self {
            includes: fields.into_iter().map(Into::into).collect(),
            excludes: Vec::new(),
        }
    }

    /// True when `field` must be omitted from returned documents.
    pub fn excludes_field(&self, field: &str) -> bool {
        if self.excludes.iter().any(|f| f == field) {
            return true;
        }
        !self.includes.is_empty() && !self.includes.iter().any(|f| f == field)
    }
}

/// One paged search over the lookup collection.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupSearch {
    /// Boolean filter selecting the documents.
    pub filter: FilterExpression,
    /// Optional restriction on returned fields.
    pub source: Option<SourceFilter>,
    /// Window of hits to return.
    pub page: PageRequest,
}

impl LookupSearch {
    /// A search for the first default-sized page, full source.
    pub fn new(filter: FilterExpression) -> Self {
        Self {
            filter,
            source: None,
            page: PageRequest::of_size(DEFAULT_PAGE_SIZE),
        }
    }

    /// Restricts the returned fields.
    pub fn with_source(mut self, source: SourceFilter) -> Self {
        self.source = Some(source);
        self
    }

    /// Selects the page window.
    pub fn with_page(mut self, page: PageRequest) -> Self {
        self.page = page;
        self
    }
}

/// A document index holding the persisted lookup collection.
///
/// Implementations must support boolean filters with `must` / `should` /
/// `must_not` groups, term and terms predicates with inline or indirect
/// values, source filtering, and a page-based read cursor. Errors are
/// reported as-is; this crate neither retries nor translates them.
pub trait ConceptLookupIndex: Send + Sync {
    /// Name of the index holding the lookup documents.
    ///
    /// Terms-lookup indirection references are built against this name.
    fn index_name(&self) -> &str;

    /// Returns one page of lookups matching the search.
    ///
    /// `Page::total` must report the full match count so callers can
    /// iterate until exhausted.
    fn search_lookups(&self, search: &LookupSearch) -> IndexResult<Page<ConceptSetLookup>>;

    /// Bulk-persists lookups, overwriting by identity.
    ///
    /// Not transactional: a mid-batch failure may leave part of the batch
    /// applied and must be reported as
    /// [`IndexError::PartialBatch`](crate::IndexError::PartialBatch).
    fn save_all(&self, lookups: &[ConceptSetLookup]) -> IndexResult<()>;

    /// Deletes every persisted lookup unconditionally.
    fn delete_all(&self) -> IndexResult<()>;
}
