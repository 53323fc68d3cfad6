//! Capability token signing for Bandstand.
//!
//! Capability tokens bind a member to a project and are handed out only on
//! admin-authorized project reads. They are signed with a process-wide
//! shared secret and verified by collaborators holding the same secret.

pub mod error;
pub mod key;
pub mod signer;

pub use error::{SignerError, SignerResult};
pub use key::SigningSecret;
pub use signer::CapabilitySigner;
