//! Recording reconciliation.
//!
//! A member has at most one recording per project. Submitting a new one
//! deletes whatever was there before accepting the upload — replace, never
//! accumulate. The delete-then-create sequence is serialized per
//! (project, member) pair; without that, two concurrent submitters can both
//! observe the old recordings before either deletes, and the pair ends up
//! with two recordings or a dangling file reference.

use crate::error::ServiceResult;
use crate::projects::{Freshness, decode, now_rfc3339};
use crate::queries;
use crate::state::ProjectService;
use crate::view::ProjectView;
use bandstand_core::DEFAULT_RECORDING_VOLUME;
use bandstand_core::document::{self, Recording};
use bandstand_core::ids::{MemberId, ProjectId};
use bandstand_core::instrument::normalize_instrument;
use bandstand_store::{AssetKind, AssetMeta, Query};
use bytes::Bytes;
use serde_json::json;

impl ProjectService {
    /// List a project's recordings with resolved playback URL and volume.
    pub async fn list_recordings(
        &self,
        project_id: &ProjectId,
    ) -> ServiceResult<Vec<Recording>> {
        let query = Query::new(queries::RECORDINGS_FOR_PROJECT)
            .projection(queries::RECORDING_PROJECTION)
            .param("kind", document::KIND_RECORDING)
            .param("project", project_id.as_str());
        let docs = self.store.query(&query).await?;
        docs.into_iter().map(decode).collect()
    }

    /// Replace a member's recording for a project.
    ///
    /// Regardless of how many recordings exist for the (project, member)
    /// pair beforehand, exactly one exists afterwards, referencing the
    /// freshly uploaded asset. Prior deletions are independent per-match
    /// deletes: a failure part-way through surfaces raw and can leave an
    /// orphaned asset behind — there is no rollback.
    ///
    /// Returns the forced-fresh, member-scoped project view.
    pub async fn submit_recording(
        &self,
        project_id: &ProjectId,
        member_id: &MemberId,
        instrument: &str,
        data: Bytes,
        filename: &str,
    ) -> ServiceResult<Option<ProjectView>> {
        let lock = self.reconcile_lock(project_id, member_id);
        let guard = lock.lock().await;

        let query = Query::new(queries::RECORDINGS_FOR_PAIR)
            .param("kind", document::KIND_RECORDING)
            .param("project", project_id.as_str())
            .param("member", member_id.as_str());
        let stale = self.store.query(&query).await?;
        for doc in stale {
            let recording: Recording = decode(doc)?;
            // Document first, then its asset: failing in between leaves an
            // orphaned asset rather than a dangling document reference.
            self.store.delete(recording.id.as_str()).await?;
            self.store.delete(recording.file.as_str()).await?;
            tracing::debug!(recording_id = %recording.id, member = %member_id, "stale recording removed");
        }

        let asset = self
            .store
            .upload_asset(
                AssetKind::File,
                data,
                AssetMeta {
                    filename: Some(filename.to_string()),
                    content_type: None,
                },
            )
            .await?;
        let instrument =
            normalize_instrument(instrument, &self.instruments).unwrap_or(instrument);
        let doc = json!({
            "created_at": now_rfc3339()?,
            "project": project_id.as_str(),
            "member": member_id.as_str(),
            "file": asset.id.as_str(),
            "volume": DEFAULT_RECORDING_VOLUME,
            "instrument": instrument,
        });
        self.store.create(document::KIND_RECORDING, doc).await?;
        tracing::info!(project_id = %project_id, member = %member_id, "recording submitted");
        drop(guard);

        self.get_project(member_id, project_id, Freshness::ForceFresh)
            .await
    }
}
