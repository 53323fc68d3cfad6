//! Document models for the backing store.
//!
//! These are the read-side shapes the service decodes store documents into.
//! Creation payloads are built as plain JSON at the call site, since the
//! store assigns ids; the structs here always carry one.

use crate::ids::{AssetId, BandId, MemberId, ProjectId, RecordingId};
use crate::{DEFAULT_RECORDING_VOLUME, MAX_RECORDING_VOLUME};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Document kind discriminators, stored in the `kind` field of every document.
pub const KIND_BAND: &str = "band";
pub const KIND_MEMBER: &str = "member";
pub const KIND_PROJECT: &str = "project";
pub const KIND_RECORDING: &str = "recording";

/// Clamp a playback volume into the valid 0..=100 range.
pub fn clamp_volume(value: u8) -> u8 {
    value.min(MAX_RECORDING_VOLUME)
}

fn default_volume() -> u8 {
    DEFAULT_RECORDING_VOLUME
}

fn default_visible() -> bool {
    true
}

/// A band: the owning organisation for projects and members.
///
/// `admins` is the owner relation: the member ids allowed to administer
/// every project of the band. The `members` roster and the resolved logo
/// fields are projections only present on directory reads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub id: BandId,
    pub name: String,
    #[serde(default)]
    pub logo: Option<AssetId>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub palette: Option<serde_json::Value>,
    #[serde(default)]
    pub admins: Vec<MemberId>,
    #[serde(default)]
    pub members: Vec<Member>,
}

/// A band member.
///
/// The band reference is weak: it exists for lookup only and carries no
/// ownership semantics. Contact fields are multi-valued.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    #[serde(default)]
    pub email: Vec<String>,
    #[serde(default)]
    pub phone: Vec<String>,
    #[serde(default)]
    pub instrument: Option<String>,
    #[serde(default)]
    pub subgroup: Option<String>,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub band: Option<BandId>,
    #[serde(default)]
    pub portrait: Option<AssetId>,
    #[serde(default)]
    pub portrait_url: Option<String>,
}

/// Admin-facing profile projection, looked up by email.
pub type AdminProfile = Member;

/// Band summary attached to a member profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BandCard {
    pub name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub palette: Option<serde_json::Value>,
}

/// Member profile with the resolved band card, looked up by member id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MemberProfile {
    #[serde(flatten)]
    pub member: Member,
    #[serde(default)]
    pub band_card: Option<BandCard>,
}

/// One score part and the members assigned to play it.
///
/// Part labels are not unique: two assignments may carry the same label and
/// remain distinct entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub part: String,
    #[serde(default)]
    pub members: Vec<MemberId>,
}

/// A project: one piece of sheet music owned by a single member.
///
/// `owner` is the strong reference establishing sole mutation rights.
/// `band_admins` is resolved from the band document on the view query and
/// absent on the raw document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub owner: MemberId,
    pub band: BandId,
    #[serde(default)]
    pub sheetmusic: Option<AssetId>,
    #[serde(default)]
    pub sheetmusic_url: Option<String>,
    #[serde(default)]
    pub bpm: Option<u32>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    #[serde(default)]
    pub band_admins: Vec<MemberId>,
}

/// A member's recording for a project.
///
/// After reconciliation at most one recording exists per (project, member)
/// pair. `url` is the resolved playback URL, present on list queries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub id: RecordingId,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub project: ProjectId,
    pub member: MemberId,
    pub file: AssetId,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_volume")]
    pub volume: u8,
    #[serde(default)]
    pub instrument: Option<String>,
}
