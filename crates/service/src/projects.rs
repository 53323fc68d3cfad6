//! Project reads, assembly and mutation.

use crate::error::{ServiceError, ServiceResult};
use crate::queries;
use crate::state::ProjectService;
use crate::view::{
    AssignedMember, AssignmentView, PlaybackRecording, ProjectSummary, ProjectView, ScoreData,
};
use bandstand_core::access::AccessRole;
use bandstand_core::assign::assign_parts;
use bandstand_core::claims::CapabilityClaims;
use bandstand_core::document::{self, Member, Project, Recording};
use bandstand_core::ids::{BandId, MemberId, ProjectId};
use bandstand_store::{AssetKind, AssetMeta, Query};
use bytes::Bytes;
use serde_json::{Map, Value, json};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Cache behavior for a project read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Freshness {
    /// Serve from the project-view cache when a live entry exists.
    #[default]
    Cached,
    /// Bypass the cache entirely and do not consult it. Used immediately
    /// after any mutation so the caller sees its own write.
    ForceFresh,
}

/// Decode a store document into a typed value.
pub(crate) fn decode<T: serde::de::DeserializeOwned>(doc: Value) -> ServiceResult<T> {
    serde_json::from_value(doc).map_err(|e| ServiceError::InvalidDocument(e.to_string()))
}

/// Format the current instant for document timestamps.
pub(crate) fn now_rfc3339() -> ServiceResult<String> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| ServiceError::InvalidDocument(format!("timestamp formatting failed: {e}")))
}

impl ProjectService {
    /// Load the requester-scoped view of a project.
    ///
    /// Returns `Ok(None)` both when the project does not exist and when the
    /// requester has no relationship to it; the two cases are
    /// distinguishable only in the logs. Admin-authorized requesters get a
    /// capability token per assigned member; musicians get the same
    /// structure without tokens.
    pub async fn get_project(
        &self,
        requester: &MemberId,
        project_id: &ProjectId,
        freshness: Freshness,
    ) -> ServiceResult<Option<ProjectView>> {
        let key = (requester.clone(), project_id.clone());
        if freshness == Freshness::Cached {
            if let Some(view) = self.project_views.get(&key) {
                tracing::debug!(project_id = %project_id, requester = %requester, "project view served from cache");
                return Ok(Some(view));
            }
        }

        let (project, recordings) = tokio::join!(
            self.fetch_project(project_id),
            self.list_recordings(project_id),
        );
        let Some(project) = project? else {
            tracing::debug!(project_id = %project_id, "project not found");
            return Ok(None);
        };
        let recordings = recordings?;

        let role = AccessRole::classify(
            requester,
            &project.owner,
            &project.band_admins,
            &project.assignments,
        );
        if !role.may_read() {
            // Deliberately indistinguishable from an absent project for the
            // caller; only the log tells the cases apart.
            tracing::warn!(project_id = %project_id, requester = %requester, "requester is neither admin nor musician for project");
            return Ok(None);
        }

        let view = self.assemble_view(project, &recordings, role)?;
        if self.populate_project_reads {
            self.project_views.insert(key, view.clone());
        }
        Ok(Some(view))
    }

    async fn fetch_project(&self, project_id: &ProjectId) -> ServiceResult<Option<Project>> {
        let query = Query::new(queries::PROJECT_VIEW)
            .projection(queries::PROJECT_VIEW_PROJECTION)
            .param("kind", document::KIND_PROJECT)
            .param("project", project_id.as_str());
        let mut docs = self.store.query(&query).await?;
        if docs.is_empty() {
            return Ok(None);
        }
        decode(docs.swap_remove(0)).map(Some)
    }

    fn assemble_view(
        &self,
        project: Project,
        recordings: &[Recording],
        role: AccessRole,
    ) -> ServiceResult<ProjectView> {
        let mut assignments = Vec::with_capacity(project.assignments.len());
        for assignment in &project.assignments {
            let mut members = Vec::with_capacity(assignment.members.len());
            for member in &assignment.members {
                let token = if role.is_admin() {
                    let claims = CapabilityClaims::new(member.clone(), project.id.clone());
                    Some(self.signer.sign(&claims)?)
                } else {
                    None
                };
                let recording = recordings
                    .iter()
                    .find(|recording| &recording.member == member)
                    .map(|recording| PlaybackRecording {
                        id: recording.id.clone(),
                        url: recording.url.clone(),
                        volume: recording.volume,
                    });
                members.push(AssignedMember {
                    member: member.clone(),
                    token,
                    recording,
                });
            }
            assignments.push(AssignmentView {
                part: assignment.part.clone(),
                members,
            });
        }
        Ok(ProjectView {
            id: project.id,
            name: project.name,
            owner: project.owner,
            band: project.band,
            bpm: project.bpm,
            sheetmusic_url: project.sheetmusic_url,
            role,
            assignments,
        })
    }

    /// Create a project: seed assignments from the part labels, upload the
    /// sheet music, create the document, then return a forced-fresh owner
    /// view so the creator sees their own write.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_project(
        &self,
        owner: &MemberId,
        band: &BandId,
        name: &str,
        bpm: u32,
        part_labels: &[String],
        roster: &[Member],
        sheet_data: Bytes,
        sheet_filename: &str,
    ) -> ServiceResult<Option<ProjectView>> {
        let assignments = assign_parts(part_labels, roster);
        let sheet = self
            .store
            .upload_asset(
                AssetKind::File,
                sheet_data,
                AssetMeta {
                    filename: Some(sheet_filename.to_string()),
                    content_type: None,
                },
            )
            .await?;
        let doc = json!({
            "name": name,
            "owner": owner.as_str(),
            "band": band.as_str(),
            "bpm": bpm,
            "sheetmusic": sheet.id.as_str(),
            "assignments": assignments,
            "created_at": now_rfc3339()?,
        });
        let created = self.store.create(document::KIND_PROJECT, doc).await?;
        let project_id = created
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| ServiceError::InvalidDocument("created project has no id".to_string()))
            .and_then(|id| ProjectId::parse(id).map_err(ServiceError::from))?;
        tracing::info!(project_id = %project_id, owner = %owner, "project created");

        self.get_project(owner, &project_id, Freshness::ForceFresh)
            .await
    }

    /// Update a project by shallow field merge and whole-document replace.
    ///
    /// Only the owner may update; anyone else fails before any write
    /// reaches the store. Returns `Ok(None)` when the project is absent.
    pub async fn update_project(
        &self,
        requester: &MemberId,
        project_id: &ProjectId,
        patch: Map<String, Value>,
    ) -> ServiceResult<Option<ProjectView>> {
        let Some(current) = self.store.get_by_id(project_id.as_str()).await? else {
            tracing::debug!(project_id = %project_id, "project not found for update");
            return Ok(None);
        };
        let owner = current.get("owner").and_then(Value::as_str);
        if owner != Some(requester.as_str()) {
            tracing::warn!(project_id = %project_id, requester = %requester, "update rejected: requester is not the owner");
            return Err(ServiceError::Forbidden(
                "only the project owner may update it".to_string(),
            ));
        }

        let Value::Object(mut merged) = current else {
            return Err(ServiceError::InvalidDocument(
                "project document is not an object".to_string(),
            ));
        };
        // Shallow overwrite of top-level fields, not a deep patch.
        for (key, value) in patch {
            merged.insert(key, value);
        }
        self.store.replace(Value::Object(merged)).await?;

        self.get_project(requester, project_id, Freshness::ForceFresh)
            .await
    }

    /// List projects owned by a member, newest first, windowed.
    pub async fn list_projects(
        &self,
        owner: &MemberId,
        start: u64,
        end: u64,
    ) -> ServiceResult<Vec<ProjectSummary>> {
        let query = Query::new(queries::PROJECTS_FOR_OWNER)
            .projection(queries::PROJECT_SUMMARY_PROJECTION)
            .param("kind", document::KIND_PROJECT)
            .param("owner", owner.as_str())
            .order(queries::ORDER_CREATED_DESC)
            .window(start, end);
        let docs = self.store.query(&query).await?;
        docs.into_iter().map(decode).collect()
    }

    /// Score data for the notation renderer: sheet-music URL plus the raw
    /// assignment labels.
    pub async fn get_score_data(
        &self,
        project_id: &ProjectId,
    ) -> ServiceResult<Option<ScoreData>> {
        let query = Query::new(queries::PROJECT_VIEW)
            .projection(queries::PROJECT_SCORE_PROJECTION)
            .param("kind", document::KIND_PROJECT)
            .param("project", project_id.as_str());
        let mut docs = self.store.query(&query).await?;
        if docs.is_empty() {
            return Ok(None);
        }
        decode(docs.swap_remove(0)).map(Some)
    }
}
