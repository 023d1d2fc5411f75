//! Page cursor types for the index read contract.

/// A window into an index result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Offset of the first hit to return.
    pub from: usize,
    /// Maximum number of hits to return.
    pub size: usize,
}

impl PageRequest {
    /// First page of the given size.
    pub fn of_size(size: usize) -> Self {
        Self { from: 0, size }
    }

    /// A window starting at `from`.
    pub fn new(from: usize, size: usize) -> Self {
        Self { from, size }
    }

    /// The window immediately after this one.
    pub fn next(&self) -> Self {
        Self {
            from: self.from + self.size,
            size: self.size,
        }
    }
}

/// One page of search hits plus the total match count across all pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Hits within the requested window.
    pub hits: Vec<T>,
    /// Total matches in the index, not just this page.
    pub total: u64,
}

impl<T> Page<T> {
    /// A page carrying the given hits.
    pub fn new(hits: Vec<T>, total: u64) -> Self {
        Self { hits, total }
    }

    /// A page with no hits and no matches.
    pub fn empty() -> Self {
        Self {
            hits: Vec::new(),
            total: 0,
        }
    }

    /// Number of hits on this page.
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// True when this page carries no hits.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_advances() {
        let first = PageRequest::of_size(1000);
        assert_eq!(first.from, 0);

        let second = first.next();
        assert_eq!(second.from, 1000);
        assert_eq!(second.size, 1000);
        assert_eq!(second.next().from, 2000);
    }

    #[test]
    fn test_empty_page() {
        let page: Page<u64> = Page::empty();
        assert!(page.is_empty());
        assert_eq!(page.len(), 0);
        assert_eq!(page.total, 0);
    }
}
