use async_trait::async_trait;
use pollsmith_core::{AppResult, OrganizationId, UserId, UserIdentity};
use pollsmith_domain::{
    Environment, EnvironmentId, Membership, Organization, ProjectId, Survey, TeamPermission,
    Webhook,
};

/// Session collaborator resolving the authenticated principal for the current
/// request.
///
/// Passed into services as an explicit argument rather than read from ambient
/// state, so a request without a session is a value (`None`), never a panic.
#[async_trait]
pub trait SessionSource: Send + Sync {
    /// Returns the authenticated identity, or `None` when no session exists.
    async fn current_identity(&self) -> AppResult<Option<UserIdentity>>;
}

/// Repository port for environment lookups.
#[async_trait]
pub trait EnvironmentRepository: Send + Sync {
    /// Finds an environment by identifier.
    async fn find_environment(
        &self,
        environment_id: EnvironmentId,
    ) -> AppResult<Option<Environment>>;
}

/// Repository port for organization lookups.
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    /// Finds the organization owning an environment.
    async fn find_by_environment_id(
        &self,
        environment_id: EnvironmentId,
    ) -> AppResult<Option<Organization>>;
}

/// Repository port for organization membership lookups.
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Finds the membership of a user in an organization.
    async fn find_membership(
        &self,
        user_id: UserId,
        organization_id: OrganizationId,
    ) -> AppResult<Option<Membership>>;
}

/// Repository port for project-level team permission lookups.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Finds the effective team permission of a user on a project.
    async fn find_project_permission(
        &self,
        user_id: UserId,
        project_id: ProjectId,
    ) -> AppResult<Option<TeamPermission>>;
}

/// Repository port for webhook listings.
#[async_trait]
pub trait WebhookRepository: Send + Sync {
    /// Lists all webhooks registered in an environment.
    async fn list_for_environment(
        &self,
        environment_id: EnvironmentId,
    ) -> AppResult<Vec<Webhook>>;
}

/// Repository port for survey listings.
#[async_trait]
pub trait SurveyRepository: Send + Sync {
    /// Lists surveys in an environment, bounded by `limit` at the store.
    async fn list_for_environment(
        &self,
        environment_id: EnvironmentId,
        limit: usize,
    ) -> AppResult<Vec<Survey>>;
}
