//! Error types for the document-index collaborator.
//!
//! The lookup service performs no retry and no translation: whatever the
//! index reports is what the caller sees.

use std::time::Duration;

use thiserror::Error;

/// Errors reported by a [`ConceptLookupIndex`](crate::ConceptLookupIndex)
/// implementation.
#[derive(Error, Debug)]
pub enum IndexError {
    /// The index cluster could not be reached.
    #[error("index connectivity failure: {0}")]
    Connectivity(String),

    /// The index rejected the query as malformed.
    #[error("malformed index query: {0}")]
    MalformedQuery(String),

    /// The index did not respond in time.
    #[error("index request timed out after {0:?}")]
    Timeout(Duration),

    /// A bulk write was only partially applied.
    ///
    /// The service performs no compensating rollback; callers decide
    /// whether to retry the batch.
    #[error("partial bulk write: {saved} saved, {failed} failed: {reason}")]
    PartialBatch {
        /// Documents persisted before the failure.
        saved: usize,
        /// Documents that were not persisted.
        failed: usize,
        /// Engine-reported cause.
        reason: String,
    },
}

/// Result type for index operations.
pub type IndexResult<T> = std::result::Result<T, IndexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_connectivity() {
        let err = IndexError::Connectivity("connection refused".to_string());
        assert_eq!(err.to_string(), "index connectivity failure: connection refused");
    }

    #[test]
    fn test_error_display_malformed_query() {
        let err = IndexError::MalformedQuery("unknown field [destinatoin]".to_string());
        assert_eq!(
            err.to_string(),
            "malformed index query: unknown field [destinatoin]"
        );
    }

    #[test]
    fn test_error_display_timeout() {
        let err = IndexError::Timeout(Duration::from_secs(30));
        assert_eq!(err.to_string(), "index request timed out after 30s");
    }

    #[test]
    fn test_error_display_partial_batch() {
        let err = IndexError::PartialBatch {
            saved: 400,
            failed: 100,
            reason: "bulk queue full".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "partial bulk write: 400 saved, 100 failed: bulk queue full"
        );
    }
}
