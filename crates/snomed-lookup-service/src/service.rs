//! Branch-scoped retrieval and maintenance of concept-set lookups.

use snomed_lookup::{compose, fields, BoolFilter, ConceptId, ConceptSetLookup, FilterExpression};
use tracing::{debug, info};

use crate::branch::BranchCriteria;
use crate::config::LookupServiceConfig;
use crate::error::IndexResult;
use crate::page::PageRequest;
use crate::traits::{ConceptLookupIndex, LookupSearch, SourceFilter};

/// Retrieval and maintenance operations over the lookup collection.
///
/// The service forwards reads and writes to the index it was constructed
/// with and performs pure in-memory filter composition; it holds no
/// mutable state of its own and is safe for unlimited concurrent callers.
/// Maintenance is not synchronized against concurrent retrieval: readers
/// may observe a document set that is being replaced. Snapshot isolation,
/// where needed, comes from the versioning collaborator that produces the
/// [`BranchCriteria`].
pub struct ConceptsLookupService<'a, I> {
    index: &'a I,
    config: LookupServiceConfig,
}

impl<'a, I: ConceptLookupIndex> ConceptsLookupService<'a, I> {
    /// Creates a service over the given index with default configuration.
    pub fn new(index: &'a I) -> Self {
        Self::with_config(index, LookupServiceConfig::default())
    }

    /// Creates a service with custom configuration.
    pub fn with_config(index: &'a I, config: LookupServiceConfig) -> Self {
        Self { index, config }
    }

    /// All lookups visible on the branch, member payloads included.
    pub fn lookups(&self, branch: &BranchCriteria) -> IndexResult<Vec<ConceptSetLookup>> {
        self.lookups_with(branch, None, true)
    }

    /// All lookups visible on the branch, member payloads omitted.
    ///
    /// `total` stays populated on every returned lookup; only the member
    /// list itself is dropped. Sufficient for filter composition, which
    /// needs identity, polarity and count alone.
    pub fn lookups_metadata(&self, branch: &BranchCriteria) -> IndexResult<Vec<ConceptSetLookup>> {
        self.lookups_with(branch, None, false)
    }

    /// Visible lookups restricted to the given refset identifiers.
    pub fn lookups_for_refsets(
        &self,
        branch: &BranchCriteria,
        refset_ids: &[ConceptId],
    ) -> IndexResult<Vec<ConceptSetLookup>> {
        self.lookups_with(branch, Some(refset_ids), true)
    }

    /// Visible lookups with full control over restriction and payload.
    ///
    /// The branch predicate is applied as a mandatory conjunct. A
    /// non-empty `refset_filter` adds a terms conjunct on
    /// [`fields::REFSET_ID`]; `None` or an empty slice adds none. Pages
    /// are fetched until the result set is exhausted, so the page size
    /// configured on the service never truncates results.
    ///
    /// Index errors propagate unchanged.
    pub fn lookups_with(
        &self,
        branch: &BranchCriteria,
        refset_filter: Option<&[ConceptId]>,
        include_member_ids: bool,
    ) -> IndexResult<Vec<ConceptSetLookup>> {
        let mut bool_filter = BoolFilter::new().must(branch.filter().clone());
        if let Some(refset_ids) = refset_filter {
            if !refset_ids.is_empty() {
                bool_filter = bool_filter.must(FilterExpression::terms(
                    fields::REFSET_ID,
                    refset_ids.iter().copied(),
                ));
            }
        }

        let mut search = LookupSearch::new(bool_filter.into())
            .with_page(PageRequest::of_size(self.config.page_size));
        if !include_member_ids {
            search = search.with_source(SourceFilter::excluding([fields::CONCEPT_IDS]));
        }

        let mut results: Vec<ConceptSetLookup> = Vec::new();
        loop {
            let page = self.index.search_lookups(&search)?;
            let fetched = page.len();
            let total = page.total;
            results.extend(page.hits);
            if fetched < search.page.size || results.len() as u64 >= total {
                break;
            }
            search.page = search.page.next();
        }

        debug!(
            "retrieved {} concept-set lookups (members: {})",
            results.len(),
            include_member_ids
        );
        Ok(results)
    }

    /// Builds the boolean filter referencing the given lookups on
    /// `field_name`, targeting this service's index.
    ///
    /// See [`compose`] for the combination rules.
    pub fn filter_for(
        &self,
        lookups: &[ConceptSetLookup],
        field_name: &str,
    ) -> FilterExpression {
        compose(lookups, self.index.index_name(), field_name)
    }

    /// Bulk-persists lookups, overwriting by identity.
    ///
    /// Used by reindexing pipelines; a mid-batch failure surfaces as the
    /// index reports it and is never rolled back here.
    pub fn save_all(&self, lookups: &[ConceptSetLookup]) -> IndexResult<()> {
        info!("saving {} concept-set lookups", lookups.len());
        self.index.save_all(lookups)
    }

    /// Deletes every persisted lookup. Irreversible; no backup is taken.
    pub fn delete_all(&self) -> IndexResult<()> {
        info!("deleting all concept-set lookups");
        self.index.delete_all()
    }

    /// The backing index.
    pub fn index(&self) -> &I {
        self.index
    }

    /// The active configuration.
    pub fn config(&self) -> &LookupServiceConfig {
        &self.config
    }
}
