use std::sync::Arc;

use pollsmith_core::{AppResult, UserIdentity};
use pollsmith_domain::{AccessFlags, Environment, Membership, Organization, TeamPermissionFlags};

use crate::{MembershipRepository, TeamRepository};

/// Effective access resolved for a principal on an environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvironmentAccess {
    /// Whether mutable affordances must be withheld from the principal.
    pub is_read_only: bool,
}

/// Application service resolving effective access to environment-scoped
/// resources.
///
/// The result is a pure function of the membership role and the project
/// permission tier for the current request; nothing is cached across requests
/// or principals.
#[derive(Clone)]
pub struct AccessService {
    membership_repository: Arc<dyn MembershipRepository>,
    team_repository: Arc<dyn TeamRepository>,
}

impl AccessService {
    /// Creates an access service from repository implementations.
    #[must_use]
    pub fn new(
        membership_repository: Arc<dyn MembershipRepository>,
        team_repository: Arc<dyn TeamRepository>,
    ) -> Self {
        Self {
            membership_repository,
            team_repository,
        }
    }

    /// Resolves the effective access of a principal on an environment.
    ///
    /// A missing membership is not an error here: it classifies the principal
    /// as holding no elevated access, and combined with the restrictive
    /// absent-permission default it resolves read-only. Callers that require
    /// membership to exist enforce that in their own contract.
    pub async fn resolve_environment_access(
        &self,
        principal: &UserIdentity,
        organization: &Organization,
        environment: &Environment,
    ) -> AppResult<EnvironmentAccess> {
        let membership = self
            .membership_repository
            .find_membership(principal.user_id(), organization.id())
            .await?;
        let access_flags = AccessFlags::from_role(membership.as_ref().map(Membership::role));

        let project_permission = self
            .team_repository
            .find_project_permission(principal.user_id(), environment.project_id())
            .await?;
        let permission_flags = TeamPermissionFlags::from_permission(project_permission);

        // A privileged role always yields mutable access; the fine-grained
        // flag only bites for restricted principals.
        let is_read_only = !access_flags.is_privileged() && permission_flags.has_read_access;

        Ok(EnvironmentAccess { is_read_only })
    }
}
