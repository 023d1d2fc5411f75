//! Configuration for the lookup service.

/// Default number of documents fetched per page.
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// Configuration for [`ConceptsLookupService`](crate::ConceptsLookupService).
///
/// # Example
///
/// ```rust
/// use snomed_lookup_service::LookupServiceConfig;
///
/// let config = LookupServiceConfig::new().with_page_size(500);
/// assert_eq!(config.page_size, 500);
/// ```
#[derive(Debug, Clone)]
pub struct LookupServiceConfig {
    /// Documents fetched per index round-trip. Retrieval always iterates
    /// every page; the size only shapes the round-trips.
    pub page_size: usize,
}

impl Default for LookupServiceConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl LookupServiceConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }
}
