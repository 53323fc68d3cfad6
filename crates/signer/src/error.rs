//! Signer error types.

use thiserror::Error;

/// Errors from capability token signing and verification.
#[derive(Debug, Error)]
pub enum SignerError {
    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token verification failed")]
    VerificationFailed,

    #[error("invalid signing secret: {0}")]
    InvalidSecret(String),

    #[error("failed to read secret: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for signer operations.
pub type SignerResult<T> = std::result::Result<T, SignerError>;
