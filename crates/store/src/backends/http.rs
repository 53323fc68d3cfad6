//! HTTP backend for the remote content store API.

use crate::error::{StoreError, StoreResult};
use crate::query::Query;
use crate::traits::{AssetKind, AssetMeta, AssetRef, Document, DocumentStore};
use async_trait::async_trait;
use bandstand_core::config::StoreConfig;
use bytes::Bytes;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

/// Client for the remote content store.
///
/// One instance per process is expected; construct it explicitly and pass
/// it down so tests can substitute a fake [`DocumentStore`].
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: Url,
    token: String,
    dataset: String,
}

#[derive(Deserialize)]
struct QueryResponse {
    result: Vec<Document>,
}

#[derive(Deserialize)]
struct DocumentResponse {
    document: Document,
}

#[derive(Deserialize)]
struct AssetResponse {
    document: AssetRef,
}

impl HttpBackend {
    /// Create a backend from configuration.
    pub fn new(config: &StoreConfig) -> StoreResult<Self> {
        let base = match &config.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => format!("https://{}.api.bandstand.app/", config.project),
        };
        let base_url = Url::parse(&base)
            .map_err(|e| StoreError::Config(format!("invalid store endpoint {base:?}: {e}")))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            token: config.token.clone(),
            dataset: config.dataset.clone(),
        })
    }

    fn url(&self, path: &str) -> StoreResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| StoreError::Config(format!("failed to build store URL: {e}")))
    }

    async fn send_json<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> StoreResult<T> {
        let response = req.bearer_auth(&self.token).send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(StoreError::Api {
                status: status.as_u16(),
                message: body,
            });
        }
        serde_json::from_str(&body)
            .map_err(|e| StoreError::InvalidDocument(format!("malformed store response: {e}")))
    }

    async fn send_empty(&self, req: reqwest::RequestBuilder) -> StoreResult<()> {
        let response = req.bearer_auth(&self.token).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for HttpBackend {
    async fn query(&self, query: &Query) -> StoreResult<Vec<Document>> {
        let url = self.url(&format!("v1/data/query/{}", self.dataset))?;
        // Draft revisions never leave this layer.
        let mut body = serde_json::to_value(query)
            .map_err(|e| StoreError::InvalidDocument(format!("unserializable query: {e}")))?;
        body["exclude_drafts"] = json!(true);
        let response: QueryResponse = self.send_json(self.http.post(url).json(&body)).await?;
        Ok(response.result)
    }

    async fn get_by_id(&self, id: &str) -> StoreResult<Option<Document>> {
        let url = self.url(&format!("v1/data/doc/{}/{}", self.dataset, id))?;
        let response = self.http.get(url).bearer_auth(&self.token).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(StoreError::Api {
                status: status.as_u16(),
                message: body,
            });
        }
        let decoded: DocumentResponse = serde_json::from_str(&body)
            .map_err(|e| StoreError::InvalidDocument(format!("malformed store response: {e}")))?;
        Ok(Some(decoded.document))
    }

    async fn create(&self, kind: &str, doc: Document) -> StoreResult<Document> {
        let url = self.url(&format!("v1/data/mutate/{}", self.dataset))?;
        let body = json!({ "create": { "kind": kind, "document": doc } });
        let response: DocumentResponse = self.send_json(self.http.post(url).json(&body)).await?;
        Ok(response.document)
    }

    async fn replace(&self, doc: Document) -> StoreResult<Document> {
        if doc.get("id").and_then(|v| v.as_str()).is_none() {
            return Err(StoreError::InvalidDocument(
                "replace requires a document with an id".to_string(),
            ));
        }
        let url = self.url(&format!("v1/data/mutate/{}", self.dataset))?;
        let body = json!({ "replace": doc });
        let response: DocumentResponse = self.send_json(self.http.post(url).json(&body)).await?;
        Ok(response.document)
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let url = self.url(&format!("v1/data/mutate/{}", self.dataset))?;
        let body = json!({ "delete": { "id": id } });
        self.send_empty(self.http.post(url).json(&body)).await
    }

    async fn upload_asset(
        &self,
        kind: AssetKind,
        data: Bytes,
        meta: AssetMeta,
    ) -> StoreResult<AssetRef> {
        let mut url = self.url(&format!("v1/assets/{}/{}", kind.as_str(), self.dataset))?;
        if let Some(filename) = &meta.filename {
            url.query_pairs_mut().append_pair("filename", filename);
        }
        let mut req = self.http.post(url).body(data);
        if let Some(content_type) = &meta.content_type {
            req = req.header(reqwest::header::CONTENT_TYPE, content_type);
        }
        let response: AssetResponse = self.send_json(req).await?;
        tracing::debug!(asset_id = %response.document.id, "asset uploaded");
        Ok(response.document)
    }

    fn backend_name(&self) -> &'static str {
        "http"
    }

    async fn health_check(&self) -> StoreResult<()> {
        let url = self.url("v1/ping")?;
        self.send_empty(self.http.get(url)).await
    }
}
