//! Test fixtures.
//!
//! Note: #[allow(dead_code)] because each test file compiles common/
//! separately.

use crate::common::store::MemoryStore;
use bandstand_core::config::AppConfig;
use bandstand_core::document::Member;
use bandstand_core::ids::{BandId, MemberId, ProjectId};
use bandstand_service::ProjectService;
use bandstand_signer::CapabilitySigner;
use bandstand_store::DocumentStore;
use serde_json::json;
use std::sync::Arc;

/// Initialize test logging once; later calls are no-ops.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_test_writer()
        .try_init();
}

#[allow(dead_code)]
pub fn mid(s: &str) -> MemberId {
    MemberId::parse(s).unwrap()
}

#[allow(dead_code)]
pub fn pid(s: &str) -> ProjectId {
    ProjectId::parse(s).unwrap()
}

#[allow(dead_code)]
pub fn bid(s: &str) -> BandId {
    BandId::parse(s).unwrap()
}

/// Build a service over the given store with the default test config.
#[allow(dead_code)]
pub fn service(store: &Arc<MemoryStore>) -> ProjectService {
    service_with_config(store, AppConfig::for_testing())
}

/// Build a service over the given store with a custom config.
#[allow(dead_code)]
pub fn service_with_config(store: &Arc<MemoryStore>, config: AppConfig) -> ProjectService {
    init_tracing();
    let store: Arc<dyn DocumentStore> = store.clone();
    let signer = CapabilitySigner::from_config(&config.signing).unwrap();
    ProjectService::new(&config, store, signer)
}

/// The signer verifying tokens minted under the test config.
#[allow(dead_code)]
pub fn test_signer() -> CapabilitySigner {
    CapabilitySigner::from_config(&AppConfig::for_testing().signing).unwrap()
}

/// Seed a band document.
#[allow(dead_code)]
pub fn seed_band(store: &MemoryStore, id: &str, name: &str, admins: &[&str]) {
    store.insert_doc(json!({
        "id": id,
        "kind": "band",
        "name": name,
        "admins": admins,
    }));
}

/// Seed a visible member document.
#[allow(dead_code)]
pub fn seed_member(store: &MemoryStore, id: &str, name: &str, band: &str) {
    store.insert_doc(json!({
        "id": id,
        "kind": "member",
        "name": name,
        "band": band,
        "visible": true,
    }));
}

/// Seed a project document with `(part, members)` assignments.
#[allow(dead_code)]
pub fn seed_project(
    store: &MemoryStore,
    id: &str,
    name: &str,
    owner: &str,
    band: &str,
    assignments: &[(&str, &[&str])],
) {
    let assignments: Vec<_> = assignments
        .iter()
        .map(|(part, members)| json!({ "part": part, "members": members }))
        .collect();
    store.insert_doc(json!({
        "id": id,
        "kind": "project",
        "name": name,
        "owner": owner,
        "band": band,
        "assignments": assignments,
        "created_at": "2024-03-01T10:00:00Z",
    }));
}

/// Seed a recording and its backing asset.
#[allow(dead_code)]
pub fn seed_recording(store: &MemoryStore, id: &str, project: &str, member: &str, asset: &str) {
    store.insert_asset(asset, &format!("https://cdn.test/{asset}/old.mp3"));
    store.insert_doc(json!({
        "id": id,
        "kind": "recording",
        "created_at": "2024-03-01T10:00:00Z",
        "project": project,
        "member": member,
        "file": asset,
        "volume": 100,
        "instrument": "trumpet",
    }));
}

/// A roster entry for part assignment.
#[allow(dead_code)]
pub fn roster_member(id: &str, name: &str) -> Member {
    Member {
        id: mid(id),
        name: name.to_string(),
        email: Vec::new(),
        phone: Vec::new(),
        instrument: None,
        subgroup: None,
        visible: true,
        band: None,
        portrait: None,
        portrait_url: None,
    }
}
