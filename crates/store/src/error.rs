//! Error types for record-store operations.

use thiserror::Error;

/// Errors returned by a [`crate::RecordStore`] implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Record not found in the collection.
    #[error("record '{id}' not found in collection '{collection}'")]
    NotFound {
        /// Collection that was queried.
        collection: String,
        /// Identifier that did not resolve.
        id: String,
    },

    /// Transport-level failure reaching the backend.
    #[error("backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status.
    #[error("backend returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned by the backend.
        body: String,
    },

    /// Backend response could not be decoded.
    #[error("failed to decode backend response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Backend unavailable (used by the in-memory double for fault injection).
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Returns true if the error means the record simply does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
