use async_trait::async_trait;
use pollsmith_application::{
    EnvironmentRepository, MembershipRepository, OrganizationRepository, TeamRepository,
};
use pollsmith_core::{AppError, AppResult, NonEmptyString, OrganizationId, UserId};
use pollsmith_domain::{
    Environment, EnvironmentId, EnvironmentType, Membership, Organization, OrganizationRole,
    ProjectId, TeamPermission,
};
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// PostgreSQL-backed lookups for the organization/environment scope of a
/// request: environments, owning organizations, memberships, and project
/// team permissions. All operations are read-only.
#[derive(Clone)]
pub struct PostgresScopeRepository {
    pool: PgPool,
}

impl PostgresScopeRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EnvironmentRepository for PostgresScopeRepository {
    async fn find_environment(
        &self,
        environment_id: EnvironmentId,
    ) -> AppResult<Option<Environment>> {
        let row = sqlx::query(
            r#"
            SELECT project_id, environment_type
            FROM environments
            WHERE id = $1
            "#,
        )
        .bind(environment_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load environment: {error}")))?;

        row.map(|row| {
            let project_id = row
                .try_get::<Uuid, _>("project_id")
                .map_err(|error| AppError::Internal(format!("invalid environment row: {error}")))?;
            let environment_type = row
                .try_get::<String, _>("environment_type")
                .map_err(|error| AppError::Internal(format!("invalid environment row: {error}")))?
                .parse::<EnvironmentType>()?;

            Ok(Environment::new(
                environment_id,
                ProjectId::from_uuid(project_id),
                environment_type,
            ))
        })
        .transpose()
    }
}

#[async_trait]
impl OrganizationRepository for PostgresScopeRepository {
    async fn find_by_environment_id(
        &self,
        environment_id: EnvironmentId,
    ) -> AppResult<Option<Organization>> {
        let row = sqlx::query(
            r#"
            SELECT organizations.id, organizations.name
            FROM organizations
            JOIN projects ON projects.organization_id = organizations.id
            JOIN environments ON environments.project_id = projects.id
            WHERE environments.id = $1
            "#,
        )
        .bind(environment_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to resolve organization: {error}"))
        })?;

        row.map(|row| {
            let id = row
                .try_get::<Uuid, _>("id")
                .map_err(|error| AppError::Internal(format!("invalid organization row: {error}")))?;
            let name = row
                .try_get::<String, _>("name")
                .map_err(|error| AppError::Internal(format!("invalid organization row: {error}")))?;

            Ok(Organization::new(
                OrganizationId::from_uuid(id),
                NonEmptyString::new(name)?,
            ))
        })
        .transpose()
    }
}

#[async_trait]
impl MembershipRepository for PostgresScopeRepository {
    async fn find_membership(
        &self,
        user_id: UserId,
        organization_id: OrganizationId,
    ) -> AppResult<Option<Membership>> {
        let stored_role = sqlx::query_scalar::<_, String>(
            r#"
            SELECT role
            FROM memberships
            WHERE user_id = $1 AND organization_id = $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(organization_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load membership: {error}")))?;

        stored_role
            .map(|role| {
                Ok(Membership::new(
                    user_id,
                    organization_id,
                    role.parse::<OrganizationRole>()?,
                ))
            })
            .transpose()
    }
}

#[async_trait]
impl TeamRepository for PostgresScopeRepository {
    async fn find_project_permission(
        &self,
        user_id: UserId,
        project_id: ProjectId,
    ) -> AppResult<Option<TeamPermission>> {
        let stored_permission = sqlx::query_scalar::<_, String>(
            r#"
            SELECT permission
            FROM project_team_permissions
            WHERE user_id = $1 AND project_id = $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(project_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to load project permission: {error}"))
        })?;

        stored_permission
            .map(|permission| permission.parse::<TeamPermission>())
            .transpose()
    }
}
