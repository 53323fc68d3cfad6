//! Access classification for project reads.
//!
//! A requester's relationship to a project is exactly one of four roles,
//! evaluated in priority order. Owner and band admin together form the
//! admin-authorized set: only they receive capability tokens and may mutate
//! the project. Musicians see the assignment structure without tokens.
//! Unauthorized requesters receive no document at all.

use crate::document::Assignment;
use crate::ids::MemberId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A requester's relationship to a project.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessRole {
    /// Requester is the project owner.
    Owner,
    /// Requester is in the band's admin set.
    BandAdmin,
    /// Requester is assigned to at least one part.
    Musician,
    /// Requester has no relationship to the project.
    Unauthorized,
}

impl AccessRole {
    /// Classify a requester against a fully-loaded project.
    ///
    /// Priority order: owner, then band admin, then assigned musician.
    pub fn classify(
        requester: &MemberId,
        owner: &MemberId,
        band_admins: &[MemberId],
        assignments: &[Assignment],
    ) -> Self {
        if requester == owner {
            return Self::Owner;
        }
        if band_admins.contains(requester) {
            return Self::BandAdmin;
        }
        if assignments
            .iter()
            .any(|assignment| assignment.members.contains(requester))
        {
            return Self::Musician;
        }
        Self::Unauthorized
    }

    /// Whether this role may mutate the project and receives capability tokens.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Owner | Self::BandAdmin)
    }

    /// Whether this role may read the project at all.
    pub fn may_read(&self) -> bool {
        !matches!(self, Self::Unauthorized)
    }
}

impl fmt::Display for AccessRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Owner => "owner",
            Self::BandAdmin => "band_admin",
            Self::Musician => "musician",
            Self::Unauthorized => "unauthorized",
        };
        write!(f, "{s}")
    }
}
