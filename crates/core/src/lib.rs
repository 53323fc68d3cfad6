//! Core domain types and shared logic for the Bandstand collaboration backend.
//!
//! This crate defines the canonical data model used across all other crates:
//! - Document ids and the draft namespace
//! - Band, member, project, assignment and recording documents
//! - Access classification for project reads
//! - Score-part label matching
//! - Capability token claims
//! - Configuration types and layered loading

pub mod access;
pub mod assign;
pub mod claims;
pub mod config;
pub mod document;
pub mod error;
pub mod ids;
pub mod instrument;

pub use access::AccessRole;
pub use assign::assign_parts;
pub use claims::CapabilityClaims;
pub use document::{
    AdminProfile, Assignment, Band, BandCard, Member, MemberProfile, Project, Recording,
};
pub use error::{Error, Result};
pub use ids::{AssetId, BandId, MemberId, ProjectId, RecordingId};

/// Volume assigned to a freshly submitted recording.
pub const DEFAULT_RECORDING_VOLUME: u8 = 100;

/// Maximum playback volume for a recording.
pub const MAX_RECORDING_VOLUME: u8 = 100;
