//! Filter and projection expressions issued against the document store.
//!
//! Runtime input always travels through query parameters; these expressions
//! are static. The in-memory test store dispatches on them by identity.

/// The authorization-bearing project view: one project by id.
pub const PROJECT_VIEW: &str = "kind == $kind && id == $project";

/// Projection resolving the sheet-music URL and the band's admin set.
pub const PROJECT_VIEW_PROJECTION: &str =
    r#"{..., "sheetmusic_url": sheetmusic->url, "band_admins": band->admins}"#;

/// Score data for the notation renderer.
pub const PROJECT_SCORE_PROJECTION: &str =
    r#"{id, "sheetmusic_url": sheetmusic->url, assignments}"#;

/// Projects owned by a member.
pub const PROJECTS_FOR_OWNER: &str = "kind == $kind && owner == $owner";

/// Summary projection for project listings.
pub const PROJECT_SUMMARY_PROJECTION: &str =
    r#"{id, name, "sheetmusic_url": sheetmusic->url}"#;

/// All recordings of a project.
pub const RECORDINGS_FOR_PROJECT: &str = "kind == $kind && project == $project";

/// Recordings of one member within a project.
pub const RECORDINGS_FOR_PAIR: &str =
    "kind == $kind && project == $project && member == $member";

/// Projection resolving the playback URL of a recording.
pub const RECORDING_PROJECTION: &str = r#"{..., "url": file->url}"#;

/// Admin profile lookup by email address.
pub const ADMIN_BY_EMAIL: &str = "kind == $kind && $email in email && visible";

/// Profile projection resolving the portrait URL.
pub const ADMIN_PROFILE_PROJECTION: &str = r#"{..., "portrait_url": portrait->url}"#;

/// Member lookup by id.
pub const MEMBER_BY_ID: &str = "kind == $kind && id == $member";

/// Member profile projection with the resolved band card.
pub const MEMBER_PROFILE_PROJECTION: &str =
    r#"{..., "portrait_url": portrait->url, "band_card": band->{name, "logo_url": logo->url, palette}}"#;

/// Visible members of a band.
pub const MEMBERS_OF_BAND: &str = "kind == $kind && band == $band && visible";

/// Bands whose admin set references a member.
pub const BANDS_FOR_ADMIN: &str = "kind == $kind && $admin in admins";

/// Band directory projection: resolved logo plus visible roster.
pub const BAND_DIRECTORY_PROJECTION: &str =
    r#"{..., "logo_url": logo->url, "members": members[visible]{..., "portrait_url": portrait->url}}"#;

/// Newest-first ordering for project listings.
pub const ORDER_CREATED_DESC: &str = "created_at desc";

/// Alphabetical ordering for rosters.
pub const ORDER_NAME_ASC: &str = "name asc";
