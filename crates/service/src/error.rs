//! Service error types.

use thiserror::Error;

/// Errors surfaced by the service layer.
///
/// Absent and unauthorized reads are not errors: they come back as
/// `Ok(None)` from the read operations. Mutations by non-owners fail fast
/// with [`ServiceError::Forbidden`] before any write happens.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid document: {0}")]
    InvalidDocument(String),

    #[error("store error: {0}")]
    Store(#[from] bandstand_store::StoreError),

    #[error("signer error: {0}")]
    Signer(#[from] bandstand_signer::SignerError),

    #[error("core error: {0}")]
    Core(#[from] bandstand_core::Error),
}

/// Result type for service operations.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
