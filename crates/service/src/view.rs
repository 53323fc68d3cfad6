//! Requester-scoped view types.

use bandstand_core::access::AccessRole;
use bandstand_core::document::Assignment;
use bandstand_core::ids::{BandId, MemberId, ProjectId, RecordingId};
use serde::{Deserialize, Serialize};

/// Playback info merged into an assignment slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaybackRecording {
    pub id: RecordingId,
    /// Resolved playback URL.
    pub url: Option<String>,
    /// Playback volume, 0..=100.
    pub volume: u8,
}

/// One member slot within an assignment, as the requester sees it.
///
/// `token` is present only on admin-authorized reads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssignedMember {
    pub member: MemberId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recording: Option<PlaybackRecording>,
}

/// A score part with its member slots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssignmentView {
    pub part: String,
    pub members: Vec<AssignedMember>,
}

/// The assembled, requester-scoped project document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectView {
    pub id: ProjectId,
    pub name: String,
    pub owner: MemberId,
    pub band: BandId,
    pub bpm: Option<u32>,
    pub sheetmusic_url: Option<String>,
    /// The requester's relationship to this project.
    pub role: AccessRole,
    pub assignments: Vec<AssignmentView>,
}

/// Summary row for project listings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub sheetmusic_url: Option<String>,
}

/// Score data handed to the notation renderer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreData {
    pub id: ProjectId,
    #[serde(default)]
    pub sheetmusic_url: Option<String>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}
