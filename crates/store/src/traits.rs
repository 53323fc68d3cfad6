//! Document store trait definitions.

use crate::error::StoreResult;
use crate::query::Query;
use async_trait::async_trait;
use bandstand_core::ids::AssetId;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A JSON-shaped document as the store returns it.
pub type Document = serde_json::Value;

/// Binary asset categories the store distinguishes on upload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetKind {
    /// Opaque files: sheet music, audio recordings.
    File,
    /// Images: portraits, band logos.
    Image,
}

impl AssetKind {
    /// Get the path segment for this asset kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Image => "image",
        }
    }
}

/// Metadata attached to an asset upload.
#[derive(Clone, Debug, Default)]
pub struct AssetMeta {
    /// Original filename, if known.
    pub filename: Option<String>,
    /// MIME type, if known.
    pub content_type: Option<String>,
}

/// Reference to an uploaded binary asset, usable in document fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    /// Asset document id.
    pub id: AssetId,
    /// Resolved download/playback URL.
    pub url: String,
}

/// Capability interface over the remote document store.
///
/// All query operations implicitly exclude documents in the draft
/// namespace. Failures surface as [`crate::StoreError`] without retries.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Run a filtered query, returning every matching document.
    async fn query(&self, query: &Query) -> StoreResult<Vec<Document>>;

    /// Fetch a single document by id. Returns `None` when absent.
    async fn get_by_id(&self, id: &str) -> StoreResult<Option<Document>>;

    /// Create a document of the given kind; the store assigns the id.
    /// Returns the stored document.
    async fn create(&self, kind: &str, doc: Document) -> StoreResult<Document>;

    /// Whole-document overwrite keyed by the embedded `id` field.
    /// This is a full replace, not a patch.
    async fn replace(&self, doc: Document) -> StoreResult<Document>;

    /// Delete a document by id.
    async fn delete(&self, id: &str) -> StoreResult<()>;

    /// Upload a binary asset, returning a reference usable in documents.
    async fn upload_asset(
        &self,
        kind: AssetKind,
        data: Bytes,
        meta: AssetMeta,
    ) -> StoreResult<AssetRef>;

    /// Get the name of this storage backend, for logging.
    fn backend_name(&self) -> &'static str;

    /// Verify store connectivity. The default implementation returns Ok(()).
    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}
