//! Signing secret loading.

use crate::error::{SignerError, SignerResult};
use bandstand_core::config::SecretSource;
use rand::RngCore;

/// Minimum accepted secret length in bytes.
pub const MIN_SECRET_LEN: usize = 16;

/// Length of generated secrets in bytes.
const GENERATED_SECRET_LEN: usize = 32;

/// The process-wide secret capability tokens are signed with.
#[derive(Clone)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    /// Create a secret from raw bytes, rejecting secrets that are too short
    /// to resist brute force.
    pub fn new(bytes: impl Into<Vec<u8>>) -> SignerResult<Self> {
        let bytes = bytes.into();
        if bytes.len() < MIN_SECRET_LEN {
            return Err(SignerError::InvalidSecret(format!(
                "secret too short: {} bytes (min: {MIN_SECRET_LEN})",
                bytes.len()
            )));
        }
        Ok(Self(bytes))
    }

    /// Generate a fresh random secret.
    pub fn generate() -> Self {
        let mut bytes = vec![0u8; GENERATED_SECRET_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Load a secret from the configured source.
    pub fn from_source(source: &SecretSource) -> SignerResult<Self> {
        match source {
            SecretSource::File { path } => {
                let data = std::fs::read_to_string(path)?;
                let secret = Self::new(data.trim().as_bytes().to_vec())?;
                tracing::info!(path = %path.display(), "loaded signing secret from file");
                Ok(secret)
            }
            SecretSource::Env { var } => {
                let data = std::env::var(var).map_err(|_| {
                    SignerError::InvalidSecret(format!("signing secret env var not set: {var}"))
                })?;
                let secret = Self::new(data.trim().as_bytes().to_vec())?;
                tracing::info!(var = %var, "loaded signing secret from environment");
                Ok(secret)
            }
            SecretSource::Value { secret } => {
                tracing::warn!("using inline signing secret (not recommended for production)");
                Self::new(secret.as_bytes().to_vec())
            }
            SecretSource::Generate => {
                tracing::warn!(
                    "generated ephemeral signing secret; tokens will stop verifying on restart"
                );
                Ok(Self::generate())
            }
        }
    }

    /// Get the raw secret bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SigningSecret").field(&"<redacted>").finish()
    }
}
