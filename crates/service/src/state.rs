//! Service construction and shared state.

use crate::cache::TtlCache;
use crate::error::ServiceResult;
use crate::view::ProjectView;
use bandstand_core::config::AppConfig;
use bandstand_core::document::{AdminProfile, MemberProfile};
use bandstand_core::ids::{MemberId, ProjectId};
use bandstand_signer::CapabilitySigner;
use bandstand_store::DocumentStore;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Cache key for assembled project views.
///
/// Keyed by requester *and* project: the assembled view differs per
/// requester (tokens are present only for admins), so project id alone
/// would leak one requester's view to another.
pub(crate) type ProjectViewKey = (MemberId, ProjectId);

/// The project access and recording reconciliation service.
///
/// Holds an explicitly injected store client, the token signer, the TTL
/// caches and the per-(project, member) reconciliation locks. Construct one
/// per process and share it; tests substitute a fake [`DocumentStore`].
pub struct ProjectService {
    pub(crate) store: Arc<dyn DocumentStore>,
    pub(crate) signer: CapabilitySigner,
    pub(crate) instruments: Vec<String>,
    pub(crate) populate_project_reads: bool,
    pub(crate) admin_profiles: TtlCache<String, Option<AdminProfile>>,
    pub(crate) member_profiles: TtlCache<MemberId, Option<MemberProfile>>,
    pub(crate) project_views: TtlCache<ProjectViewKey, ProjectView>,
    reconcile_locks: DashMap<(ProjectId, MemberId), Arc<Mutex<()>>>,
}

impl ProjectService {
    /// Create a service from configuration and injected collaborators.
    pub fn new(config: &AppConfig, store: Arc<dyn DocumentStore>, signer: CapabilitySigner) -> Self {
        let ttl = config.cache.ttl();
        Self {
            store,
            signer,
            instruments: config.instruments.clone(),
            populate_project_reads: config.cache.populate_project_reads,
            admin_profiles: TtlCache::new(ttl),
            member_profiles: TtlCache::new(ttl),
            project_views: TtlCache::new(ttl),
            reconcile_locks: DashMap::new(),
        }
    }

    /// Create a service from configuration alone, building the HTTP store
    /// backend and the signer from it.
    pub fn from_config(config: &AppConfig) -> ServiceResult<Self> {
        let store = bandstand_store::from_config(&config.store)?;
        let signer = CapabilitySigner::from_config(&config.signing)?;
        Ok(Self::new(config, store, signer))
    }

    /// Drop every cache entry unconditionally.
    ///
    /// This is the only invalidation primitive: there is no per-key
    /// invalidation on mutation, staleness is otherwise bounded by TTL.
    pub fn purge_caches(&self) {
        self.admin_profiles.purge_all();
        self.member_profiles.purge_all();
        self.project_views.purge_all();
    }

    /// Get the mutex serializing recording reconciliation for one
    /// (project, member) pair. Entries are a few words each and stay for
    /// the life of the process.
    pub(crate) fn reconcile_lock(
        &self,
        project: &ProjectId,
        member: &MemberId,
    ) -> Arc<Mutex<()>> {
        self.reconcile_locks
            .entry((project.clone(), member.clone()))
            .or_default()
            .clone()
    }
}
