//! Capability token signing and verification.

use crate::error::{SignerError, SignerResult};
use crate::key::SigningSecret;
use bandstand_core::claims::CapabilityClaims;
use bandstand_core::config::SigningConfig;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Signs and verifies capability tokens against the process-wide secret.
///
/// Token format: `base64url(claims_json) "." base64url(hmac_sha256)`.
/// The token is opaque to holders; collaborators holding the shared secret
/// can verify it and extract the claims.
pub struct CapabilitySigner {
    secret: SigningSecret,
}

impl CapabilitySigner {
    /// Create a signer from a secret.
    pub fn new(secret: SigningSecret) -> Self {
        Self { secret }
    }

    /// Create a signer from signing configuration.
    pub fn from_config(config: &SigningConfig) -> SignerResult<Self> {
        Ok(Self::new(SigningSecret::from_source(&config.secret)?))
    }

    fn mac(&self) -> HmacSha256 {
        // HMAC accepts keys of any length; new_from_slice cannot fail here.
        HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC key of any length is valid")
    }

    /// Mint a token for the given claims.
    pub fn sign(&self, claims: &CapabilityClaims) -> SignerResult<String> {
        let payload = serde_json::to_vec(claims)
            .map_err(|e| SignerError::InvalidToken(format!("unserializable claims: {e}")))?;
        let mut mac = self.mac();
        mac.update(&payload);
        let tag = mac.finalize().into_bytes();
        Ok(format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(&payload),
            URL_SAFE_NO_PAD.encode(tag)
        ))
    }

    /// Verify a token and extract its claims.
    ///
    /// The MAC comparison is constant-time. There is no expiry claim to
    /// check: tokens are long-lived bearer capabilities.
    pub fn verify(&self, token: &str) -> SignerResult<CapabilityClaims> {
        let (payload_b64, tag_b64) = token
            .split_once('.')
            .ok_or_else(|| SignerError::InvalidToken("missing signature separator".to_string()))?;
        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|e| SignerError::InvalidToken(format!("invalid payload base64: {e}")))?;
        let tag = URL_SAFE_NO_PAD
            .decode(tag_b64)
            .map_err(|e| SignerError::InvalidToken(format!("invalid signature base64: {e}")))?;

        let mut mac = self.mac();
        mac.update(&payload);
        mac.verify_slice(&tag)
            .map_err(|_| SignerError::VerificationFailed)?;

        serde_json::from_slice(&payload)
            .map_err(|e| SignerError::InvalidToken(format!("invalid claims: {e}")))
    }
}
