//! Store error types.

use thiserror::Error;

/// Errors from the backing document store.
///
/// Failures propagate unmodified to the caller; no retry or backoff happens
/// at this layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document not found: {0}")]
    NotFound(String),

    #[error("store API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid document: {0}")]
    InvalidDocument(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
