//! In-memory fake of the document store.
//!
//! Interprets exactly the filter and projection expressions the service
//! issues (dispatching on them by identity) over plain JSON documents, and
//! counts calls so tests can assert cache behavior and the absence of
//! writes. Unknown expressions panic: a new query needs a new arm here.

use async_trait::async_trait;
use bandstand_core::ids::AssetId;
use bandstand_service::queries;
use bandstand_store::{
    AssetKind, AssetMeta, AssetRef, Document, DocumentStore, Query, StoreError, StoreResult,
};
use bytes::Bytes;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A stored binary asset.
/// Note: #[allow(dead_code)] because each test file compiles common/
/// separately and not all of them read the payload back.
#[derive(Clone)]
#[allow(dead_code)]
pub struct StoredAsset {
    pub url: String,
    pub data: Bytes,
}

/// In-memory [`DocumentStore`] fake.
pub struct MemoryStore {
    docs: Mutex<Vec<Value>>,
    assets: Mutex<HashMap<String, StoredAsset>>,
    next_id: AtomicUsize,
    pub query_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub replace_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    pub upload_calls: AtomicUsize,
}

#[allow(dead_code)]
impl MemoryStore {
    pub fn new() -> Self {
        Self {
            docs: Mutex::new(Vec::new()),
            assets: Mutex::new(HashMap::new()),
            next_id: AtomicUsize::new(1),
            query_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
            replace_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
            upload_calls: AtomicUsize::new(0),
        }
    }

    /// Insert a document verbatim; it must carry `id` and `kind`.
    pub fn insert_doc(&self, doc: Value) {
        assert!(doc.get("id").is_some() && doc.get("kind").is_some());
        self.docs.lock().unwrap().push(doc);
    }

    /// Register a binary asset under a fixed id.
    pub fn insert_asset(&self, id: &str, url: &str) {
        self.assets.lock().unwrap().insert(
            id.to_string(),
            StoredAsset {
                url: url.to_string(),
                data: Bytes::new(),
            },
        );
    }

    /// Fetch a stored document by id, drafts included.
    pub fn raw_doc(&self, id: &str) -> Option<Value> {
        self.docs
            .lock()
            .unwrap()
            .iter()
            .find(|doc| field_str(doc, "id") == Some(id))
            .cloned()
    }

    /// Overwrite a stored document in place, bypassing the call counters.
    /// Returns `None` when no document carries the embedded id.
    pub fn replace_doc(&self, doc: Value) -> Option<()> {
        let id = field_str(&doc, "id")?.to_string();
        let mut docs = self.docs.lock().unwrap();
        let slot = docs
            .iter_mut()
            .find(|existing| field_str(existing, "id") == Some(id.as_str()))?;
        *slot = doc;
        Some(())
    }

    /// Number of stored binary assets.
    pub fn asset_count(&self) -> usize {
        self.assets.lock().unwrap().len()
    }

    /// Whether an asset with the given id exists.
    pub fn has_asset(&self, id: &str) -> bool {
        self.assets.lock().unwrap().contains_key(id)
    }

    pub fn queries(&self) -> usize {
        self.query_calls.load(Ordering::SeqCst)
    }

    fn fresh_id(&self, prefix: &str) -> String {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        format!("{prefix}-{n:04}")
    }

    fn asset_url(&self, id: &str) -> Option<String> {
        self.assets.lock().unwrap().get(id).map(|a| a.url.clone())
    }

    fn band_admins(&self, band_id: &str) -> Vec<String> {
        self.docs
            .lock()
            .unwrap()
            .iter()
            .find(|doc| {
                field_str(doc, "kind") == Some("band") && field_str(doc, "id") == Some(band_id)
            })
            .and_then(|band| band.get("admins").cloned())
            .and_then(|admins| serde_json::from_value(admins).ok())
            .unwrap_or_default()
    }

    fn band_doc(&self, band_id: &str) -> Option<Value> {
        self.docs
            .lock()
            .unwrap()
            .iter()
            .find(|doc| {
                field_str(doc, "kind") == Some("band") && field_str(doc, "id") == Some(band_id)
            })
            .cloned()
    }

    fn visible_members_of(&self, band_id: &str) -> Vec<Value> {
        self.docs
            .lock()
            .unwrap()
            .iter()
            .filter(|doc| {
                field_str(doc, "kind") == Some("member")
                    && field_str(doc, "band") == Some(band_id)
                    && is_visible(doc)
            })
            .cloned()
            .collect()
    }

    fn apply_projection(&self, projection: Option<&str>, doc: &Value) -> Value {
        let Some(projection) = projection else {
            return doc.clone();
        };
        match projection {
            p if p == queries::PROJECT_VIEW_PROJECTION => {
                let mut out = doc.clone();
                let obj = out.as_object_mut().unwrap();
                if let Some(url) = field_str(doc, "sheetmusic").and_then(|a| self.asset_url(a)) {
                    obj.insert("sheetmusic_url".to_string(), Value::from(url));
                }
                let admins = field_str(doc, "band")
                    .map(|band| self.band_admins(band))
                    .unwrap_or_default();
                obj.insert("band_admins".to_string(), json!(admins));
                out
            }
            p if p == queries::PROJECT_SCORE_PROJECTION => json!({
                "id": doc.get("id"),
                "sheetmusic_url": field_str(doc, "sheetmusic").and_then(|a| self.asset_url(a)),
                "assignments": doc.get("assignments").cloned().unwrap_or_else(|| json!([])),
            }),
            p if p == queries::PROJECT_SUMMARY_PROJECTION => json!({
                "id": doc.get("id"),
                "name": doc.get("name"),
                "sheetmusic_url": field_str(doc, "sheetmusic").and_then(|a| self.asset_url(a)),
            }),
            p if p == queries::RECORDING_PROJECTION => {
                let mut out = doc.clone();
                if let Some(url) = field_str(doc, "file").and_then(|a| self.asset_url(a)) {
                    out.as_object_mut()
                        .unwrap()
                        .insert("url".to_string(), Value::from(url));
                }
                out
            }
            p if p == queries::ADMIN_PROFILE_PROJECTION => {
                let mut out = doc.clone();
                if let Some(url) = field_str(doc, "portrait").and_then(|a| self.asset_url(a)) {
                    out.as_object_mut()
                        .unwrap()
                        .insert("portrait_url".to_string(), Value::from(url));
                }
                out
            }
            p if p == queries::MEMBER_PROFILE_PROJECTION => {
                let mut out = doc.clone();
                let obj = out.as_object_mut().unwrap();
                if let Some(url) = field_str(doc, "portrait").and_then(|a| self.asset_url(a)) {
                    obj.insert("portrait_url".to_string(), Value::from(url));
                }
                if let Some(band) = field_str(doc, "band").and_then(|b| self.band_doc(b)) {
                    obj.insert(
                        "band_card".to_string(),
                        json!({
                            "name": band.get("name"),
                            "logo_url": field_str(&band, "logo").and_then(|a| self.asset_url(a)),
                            "palette": band.get("palette"),
                        }),
                    );
                }
                out
            }
            p if p == queries::BAND_DIRECTORY_PROJECTION => {
                let mut out = doc.clone();
                let band_id = field_str(doc, "id").unwrap().to_string();
                let members: Vec<Value> = self
                    .visible_members_of(&band_id)
                    .into_iter()
                    .map(|member| {
                        let mut member = member;
                        if let Some(url) =
                            field_str(&member, "portrait").and_then(|a| self.asset_url(a))
                        {
                            member
                                .as_object_mut()
                                .unwrap()
                                .insert("portrait_url".to_string(), Value::from(url));
                        }
                        member
                    })
                    .collect();
                let obj = out.as_object_mut().unwrap();
                if let Some(url) = field_str(doc, "logo").and_then(|a| self.asset_url(a)) {
                    obj.insert("logo_url".to_string(), Value::from(url));
                }
                obj.insert("members".to_string(), Value::from(members));
                out
            }
            other => panic!("unhandled projection: {other}"),
        }
    }
}

fn field_str<'a>(doc: &'a Value, field: &str) -> Option<&'a str> {
    doc.get(field).and_then(Value::as_str)
}

fn is_visible(doc: &Value) -> bool {
    doc.get("visible").and_then(Value::as_bool).unwrap_or(true)
}

fn is_draft(doc: &Value) -> bool {
    field_str(doc, "id").is_some_and(|id| id.starts_with("drafts."))
}

fn param<'a>(query: &'a Query, name: &str) -> &'a str {
    query
        .params
        .get(name)
        .and_then(Value::as_str)
        .unwrap_or_else(|| panic!("query missing parameter ${name}"))
}

fn filter_matches(query: &Query, doc: &Value) -> bool {
    match query.filter {
        f if f == queries::PROJECT_VIEW => field_str(doc, "id") == Some(param(query, "project")),
        f if f == queries::PROJECTS_FOR_OWNER => {
            field_str(doc, "owner") == Some(param(query, "owner"))
        }
        f if f == queries::RECORDINGS_FOR_PROJECT => {
            field_str(doc, "project") == Some(param(query, "project"))
        }
        f if f == queries::RECORDINGS_FOR_PAIR => {
            field_str(doc, "project") == Some(param(query, "project"))
                && field_str(doc, "member") == Some(param(query, "member"))
        }
        f if f == queries::ADMIN_BY_EMAIL => {
            let email = param(query, "email");
            is_visible(doc)
                && doc
                    .get("email")
                    .and_then(Value::as_array)
                    .is_some_and(|emails| emails.iter().any(|e| e.as_str() == Some(email)))
        }
        f if f == queries::MEMBER_BY_ID => field_str(doc, "id") == Some(param(query, "member")),
        f if f == queries::MEMBERS_OF_BAND => {
            field_str(doc, "band") == Some(param(query, "band")) && is_visible(doc)
        }
        f if f == queries::BANDS_FOR_ADMIN => {
            let admin = param(query, "admin");
            doc.get("admins")
                .and_then(Value::as_array)
                .is_some_and(|admins| admins.iter().any(|a| a.as_str() == Some(admin)))
        }
        other => panic!("unhandled filter: {other}"),
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn query(&self, query: &Query) -> StoreResult<Vec<Document>> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        let snapshot: Vec<Value> = self.docs.lock().unwrap().clone();
        let kind = param(query, "kind");

        let mut matched: Vec<Value> = snapshot
            .into_iter()
            .filter(|doc| !is_draft(doc))
            .filter(|doc| field_str(doc, "kind") == Some(kind))
            .filter(|doc| filter_matches(query, doc))
            .collect();

        match query.order {
            Some(o) if o == queries::ORDER_CREATED_DESC => matched.reverse(),
            Some(o) if o == queries::ORDER_NAME_ASC => {
                matched.sort_by_key(|doc| field_str(doc, "name").unwrap_or("").to_string());
            }
            Some(other) => panic!("unhandled order: {other}"),
            None => {}
        }

        if let Some((start, end)) = query.window {
            let start = (start as usize).min(matched.len());
            let end = (end as usize).min(matched.len());
            matched = matched[start..end].to_vec();
        }

        Ok(matched
            .iter()
            .map(|doc| self.apply_projection(query.projection, doc))
            .collect())
    }

    async fn get_by_id(&self, id: &str) -> StoreResult<Option<Document>> {
        if id.starts_with("drafts.") {
            return Ok(None);
        }
        Ok(self.raw_doc(id))
    }

    async fn create(&self, kind: &str, mut doc: Document) -> StoreResult<Document> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let id = self.fresh_id(kind);
        let obj = doc.as_object_mut().ok_or_else(|| {
            StoreError::InvalidDocument("create expects an object".to_string())
        })?;
        obj.insert("id".to_string(), Value::from(id));
        obj.insert("kind".to_string(), Value::from(kind));
        self.docs.lock().unwrap().push(doc.clone());
        Ok(doc)
    }

    async fn replace(&self, doc: Document) -> StoreResult<Document> {
        self.replace_calls.fetch_add(1, Ordering::SeqCst);
        let id = field_str(&doc, "id")
            .ok_or_else(|| {
                StoreError::InvalidDocument("replace requires a document with an id".to_string())
            })?
            .to_string();
        let mut docs = self.docs.lock().unwrap();
        match docs
            .iter_mut()
            .find(|existing| field_str(existing, "id") == Some(id.as_str()))
        {
            Some(existing) => *existing = doc.clone(),
            None => docs.push(doc.clone()),
        }
        Ok(doc)
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        {
            let mut docs = self.docs.lock().unwrap();
            let before = docs.len();
            docs.retain(|doc| field_str(doc, "id") != Some(id));
            if docs.len() < before {
                return Ok(());
            }
        }
        if self.assets.lock().unwrap().remove(id).is_some() {
            return Ok(());
        }
        Err(StoreError::NotFound(id.to_string()))
    }

    async fn upload_asset(
        &self,
        _kind: AssetKind,
        data: Bytes,
        meta: AssetMeta,
    ) -> StoreResult<AssetRef> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        let id = self.fresh_id("asset");
        let filename = meta.filename.unwrap_or_else(|| "upload.bin".to_string());
        let url = format!("https://cdn.test/{id}/{filename}");
        self.assets.lock().unwrap().insert(
            id.clone(),
            StoredAsset {
                url: url.clone(),
                data,
            },
        );
        Ok(AssetRef {
            id: AssetId::parse(id).expect("generated asset id is valid"),
            url,
        })
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
