//! Document store abstraction and backends for Bandstand.
//!
//! This crate provides:
//! - The [`DocumentStore`] capability trait the service layer depends on
//! - Parameterized [`Query`] values with implicit draft exclusion
//! - The HTTP backend speaking to the remote content store

pub mod backends;
pub mod error;
pub mod query;
pub mod traits;

pub use backends::http::HttpBackend;
pub use error::{StoreError, StoreResult};
pub use query::Query;
pub use traits::{AssetKind, AssetMeta, AssetRef, Document, DocumentStore};

use bandstand_core::config::StoreConfig;
use std::sync::Arc;

/// Create a document store from configuration.
pub fn from_config(config: &StoreConfig) -> StoreResult<Arc<dyn DocumentStore>> {
    let backend = HttpBackend::new(config)?;
    Ok(Arc::new(backend))
}
