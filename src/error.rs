//! Error types for the storage boundary.
//!
//! The engine's pure components (extraction, classification, date
//! normalization, aggregation) are total functions and never fail; only
//! delegated storage calls can. Unparseable dates are a skip signal handled
//! inline, not an error.

use thiserror::Error;

/// Errors surfaced by [`crate::store::EmailStore`] implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend rejected or could not complete the query.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// The backend is temporarily unavailable.
    #[error("storage backend busy")]
    Busy,
}

impl StoreError {
    /// Returns true if retrying the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Busy)
    }
}
