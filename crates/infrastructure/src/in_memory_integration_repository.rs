use std::collections::HashMap;

use async_trait::async_trait;
use pollsmith_application::{
    EnvironmentRepository, MembershipRepository, OrganizationRepository, SurveyRepository,
    TeamRepository, WebhookRepository,
};
use pollsmith_core::{AppResult, OrganizationId, UserId};
use pollsmith_domain::{
    Environment, EnvironmentId, Membership, Organization, ProjectId, Survey, TeamPermission,
    Webhook,
};
use tokio::sync::RwLock;

/// In-memory implementation of every integration data port.
///
/// Backs integration-style tests that drive the real application services
/// without a database.
#[derive(Debug, Default)]
pub struct InMemoryIntegrationRepository {
    organizations: RwLock<HashMap<OrganizationId, Organization>>,
    projects: RwLock<HashMap<ProjectId, OrganizationId>>,
    environments: RwLock<HashMap<EnvironmentId, Environment>>,
    memberships: RwLock<HashMap<(UserId, OrganizationId), Membership>>,
    project_permissions: RwLock<HashMap<(UserId, ProjectId), TeamPermission>>,
    webhooks: RwLock<Vec<Webhook>>,
    surveys: RwLock<Vec<Survey>>,
}

impl InMemoryIntegrationRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an organization record.
    pub async fn upsert_organization(&self, organization: Organization) {
        self.organizations
            .write()
            .await
            .insert(organization.id(), organization);
    }

    /// Links a project to its owning organization.
    pub async fn upsert_project(&self, project_id: ProjectId, organization_id: OrganizationId) {
        self.projects.write().await.insert(project_id, organization_id);
    }

    /// Stores an environment record.
    pub async fn upsert_environment(&self, environment: Environment) {
        self.environments
            .write()
            .await
            .insert(environment.id(), environment);
    }

    /// Stores a membership record.
    pub async fn upsert_membership(&self, membership: Membership) {
        self.memberships.write().await.insert(
            (membership.user_id(), membership.organization_id()),
            membership,
        );
    }

    /// Stores a project team permission.
    pub async fn upsert_project_permission(
        &self,
        user_id: UserId,
        project_id: ProjectId,
        permission: TeamPermission,
    ) {
        self.project_permissions
            .write()
            .await
            .insert((user_id, project_id), permission);
    }

    /// Registers a webhook.
    pub async fn insert_webhook(&self, webhook: Webhook) {
        self.webhooks.write().await.push(webhook);
    }

    /// Registers a survey.
    pub async fn insert_survey(&self, survey: Survey) {
        self.surveys.write().await.push(survey);
    }
}

#[async_trait]
impl EnvironmentRepository for InMemoryIntegrationRepository {
    async fn find_environment(
        &self,
        environment_id: EnvironmentId,
    ) -> AppResult<Option<Environment>> {
        Ok(self.environments.read().await.get(&environment_id).cloned())
    }
}

#[async_trait]
impl OrganizationRepository for InMemoryIntegrationRepository {
    async fn find_by_environment_id(
        &self,
        environment_id: EnvironmentId,
    ) -> AppResult<Option<Organization>> {
        let project_id = match self.environments.read().await.get(&environment_id) {
            Some(environment) => environment.project_id(),
            None => return Ok(None),
        };
        let organization_id = match self.projects.read().await.get(&project_id) {
            Some(organization_id) => *organization_id,
            None => return Ok(None),
        };

        Ok(self
            .organizations
            .read()
            .await
            .get(&organization_id)
            .cloned())
    }
}

#[async_trait]
impl MembershipRepository for InMemoryIntegrationRepository {
    async fn find_membership(
        &self,
        user_id: UserId,
        organization_id: OrganizationId,
    ) -> AppResult<Option<Membership>> {
        Ok(self
            .memberships
            .read()
            .await
            .get(&(user_id, organization_id))
            .cloned())
    }
}

#[async_trait]
impl TeamRepository for InMemoryIntegrationRepository {
    async fn find_project_permission(
        &self,
        user_id: UserId,
        project_id: ProjectId,
    ) -> AppResult<Option<TeamPermission>> {
        Ok(self
            .project_permissions
            .read()
            .await
            .get(&(user_id, project_id))
            .copied())
    }
}

#[async_trait]
impl WebhookRepository for InMemoryIntegrationRepository {
    async fn list_for_environment(
        &self,
        environment_id: EnvironmentId,
    ) -> AppResult<Vec<Webhook>> {
        Ok(self
            .webhooks
            .read()
            .await
            .iter()
            .filter(|webhook| webhook.environment_id() == environment_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SurveyRepository for InMemoryIntegrationRepository {
    async fn list_for_environment(
        &self,
        environment_id: EnvironmentId,
        limit: usize,
    ) -> AppResult<Vec<Survey>> {
        Ok(self
            .surveys
            .read()
            .await
            .iter()
            .filter(|survey| survey.environment_id() == environment_id)
            .take(limit)
            .cloned()
            .collect())
    }
}
