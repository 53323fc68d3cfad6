//! Capability token claims.

use crate::ids::{MemberId, ProjectId};
use serde::{Deserialize, Serialize};

/// Claims carried by a capability token.
///
/// A token binds one member to one project, granting scoped access to that
/// member's recording endpoints. There is deliberately no issued-at or
/// expiry claim: tokens are long-lived bearer capabilities in the current
/// design.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityClaims {
    pub member_id: MemberId,
    pub project_id: ProjectId,
}

impl CapabilityClaims {
    /// Build claims binding a member to a project.
    pub fn new(member_id: MemberId, project_id: ProjectId) -> Self {
        Self {
            member_id,
            project_id,
        }
    }
}
