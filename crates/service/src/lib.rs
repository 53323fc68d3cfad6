//! Project access and recording reconciliation for Bandstand.
//!
//! This crate assembles the core invariants of the platform:
//! - Requester classification against a project's ownership graph
//! - Per-member capability tokens on admin-authorized reads
//! - Replace-not-accumulate recording submission, serialized per
//!   (project, member) pair
//! - TTL caches for identity lookups and requester-scoped project views
//!
//! The HTTP layer is an external collaborator: it translates
//! [`ServiceError`] values and absent results into responses, and is not
//! part of this crate.

pub mod cache;
pub mod error;
pub mod members;
pub mod projects;
pub mod queries;
pub mod recordings;
pub mod state;
pub mod view;

pub use cache::TtlCache;
pub use error::{ServiceError, ServiceResult};
pub use members::MemberUpsert;
pub use projects::Freshness;
pub use state::ProjectService;
pub use view::{
    AssignedMember, AssignmentView, PlaybackRecording, ProjectSummary, ProjectView, ScoreData,
};
