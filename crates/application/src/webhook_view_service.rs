use std::sync::Arc;

use pollsmith_core::{AppError, AppResult};
use pollsmith_domain::{Environment, EnvironmentId, Survey, Webhook};

use crate::{
    AccessService, EnvironmentRepository, OrganizationRepository, SessionSource, SurveyRepository,
    WebhookRepository,
};

/// Default upper bound on surveys fetched per overview.
///
/// Load-shedding against the upstream store's paging limit, not a property of
/// the survey model itself.
pub const DEFAULT_SURVEY_FETCH_LIMIT: usize = 200;

/// View model for the webhook integrations overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookOverview {
    /// Webhooks ordered by creation time, most recent first.
    pub webhooks: Vec<Webhook>,
    /// Surveys for cross-referencing trigger configuration, unfiltered.
    pub surveys: Vec<Survey>,
    /// The resolved environment record.
    pub environment: Environment,
    /// Whether the create affordance must be withheld from the caller.
    pub is_read_only: bool,
}

/// Application service assembling the webhook integrations overview.
#[derive(Clone)]
pub struct WebhookViewService {
    access_service: AccessService,
    environment_repository: Arc<dyn EnvironmentRepository>,
    organization_repository: Arc<dyn OrganizationRepository>,
    webhook_repository: Arc<dyn WebhookRepository>,
    survey_repository: Arc<dyn SurveyRepository>,
    survey_limit: usize,
}

impl WebhookViewService {
    /// Creates the service with the default survey fetch limit.
    #[must_use]
    pub fn new(
        access_service: AccessService,
        environment_repository: Arc<dyn EnvironmentRepository>,
        organization_repository: Arc<dyn OrganizationRepository>,
        webhook_repository: Arc<dyn WebhookRepository>,
        survey_repository: Arc<dyn SurveyRepository>,
    ) -> Self {
        Self::with_survey_limit(
            access_service,
            environment_repository,
            organization_repository,
            webhook_repository,
            survey_repository,
            DEFAULT_SURVEY_FETCH_LIMIT,
        )
    }

    /// Creates the service with an explicit survey fetch limit.
    #[must_use]
    pub fn with_survey_limit(
        access_service: AccessService,
        environment_repository: Arc<dyn EnvironmentRepository>,
        organization_repository: Arc<dyn OrganizationRepository>,
        webhook_repository: Arc<dyn WebhookRepository>,
        survey_repository: Arc<dyn SurveyRepository>,
        survey_limit: usize,
    ) -> Self {
        Self {
            access_service,
            environment_repository,
            organization_repository,
            webhook_repository,
            survey_repository,
            survey_limit,
        }
    }

    /// Assembles the webhook overview for an environment.
    ///
    /// The five upstream fetches (session, organization, webhooks, surveys,
    /// environment) run concurrently behind a join barrier; no result is
    /// consumed before all five complete. Any upstream failure is terminal
    /// for the whole assembly; there is no partial view.
    ///
    /// Webhooks with equal `created_at` carry no guaranteed relative order;
    /// the comparison inherits the store comparator and is intentionally not
    /// stabilized with a secondary key.
    pub async fn webhook_overview(
        &self,
        session: &dyn SessionSource,
        environment_id: EnvironmentId,
    ) -> AppResult<WebhookOverview> {
        let (identity, organization, webhooks, surveys, environment) = tokio::join!(
            session.current_identity(),
            self.organization_repository
                .find_by_environment_id(environment_id),
            self.webhook_repository.list_for_environment(environment_id),
            self.survey_repository
                .list_for_environment(environment_id, self.survey_limit),
            self.environment_repository.find_environment(environment_id),
        );

        let identity = identity?
            .ok_or_else(|| AppError::Unauthorized("session not found".to_owned()))?;
        let environment = environment?.ok_or_else(|| {
            AppError::NotFound(format!("environment '{environment_id}' not found"))
        })?;
        let organization = organization?.ok_or_else(|| {
            AppError::NotFound(format!(
                "organization not found for environment '{environment_id}'"
            ))
        })?;
        let mut webhooks = webhooks?;
        let surveys = surveys?;

        let access = self
            .access_service
            .resolve_environment_access(&identity, &organization, &environment)
            .await?;

        webhooks.sort_by(|left, right| right.created_at().cmp(&left.created_at()));

        Ok(WebhookOverview {
            webhooks,
            surveys,
            environment,
            is_read_only: access.is_read_only,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};
    use pollsmith_core::{
        AppError, AppResult, NonEmptyString, OrganizationId, UserId, UserIdentity,
    };
    use pollsmith_domain::{
        Environment, EnvironmentId, EnvironmentType, Membership, Organization, OrganizationRole,
        ProjectId, Survey, SurveyId, TeamPermission, Webhook, WebhookId, WebhookSource,
    };
    use tokio::sync::Mutex;

    use crate::{
        AccessService, EnvironmentRepository, MembershipRepository, OrganizationRepository,
        SessionSource, SurveyRepository, TeamRepository, WebhookRepository,
    };

    use super::WebhookViewService;

    struct FakeSessionSource {
        identity: Option<UserIdentity>,
    }

    #[async_trait]
    impl SessionSource for FakeSessionSource {
        async fn current_identity(&self) -> AppResult<Option<UserIdentity>> {
            Ok(self.identity.clone())
        }
    }

    #[derive(Default)]
    struct FakeEnvironmentRepository {
        environments: HashMap<EnvironmentId, Environment>,
    }

    #[async_trait]
    impl EnvironmentRepository for FakeEnvironmentRepository {
        async fn find_environment(
            &self,
            environment_id: EnvironmentId,
        ) -> AppResult<Option<Environment>> {
            Ok(self.environments.get(&environment_id).cloned())
        }
    }

    #[derive(Default)]
    struct FakeOrganizationRepository {
        organizations: HashMap<EnvironmentId, Organization>,
    }

    #[async_trait]
    impl OrganizationRepository for FakeOrganizationRepository {
        async fn find_by_environment_id(
            &self,
            environment_id: EnvironmentId,
        ) -> AppResult<Option<Organization>> {
            Ok(self.organizations.get(&environment_id).cloned())
        }
    }

    #[derive(Default)]
    struct FakeMembershipRepository {
        memberships: HashMap<(UserId, OrganizationId), OrganizationRole>,
    }

    #[async_trait]
    impl MembershipRepository for FakeMembershipRepository {
        async fn find_membership(
            &self,
            user_id: UserId,
            organization_id: OrganizationId,
        ) -> AppResult<Option<Membership>> {
            Ok(self
                .memberships
                .get(&(user_id, organization_id))
                .map(|role| Membership::new(user_id, organization_id, *role)))
        }
    }

    #[derive(Default)]
    struct FakeTeamRepository {
        permissions: HashMap<(UserId, ProjectId), TeamPermission>,
    }

    #[async_trait]
    impl TeamRepository for FakeTeamRepository {
        async fn find_project_permission(
            &self,
            user_id: UserId,
            project_id: ProjectId,
        ) -> AppResult<Option<TeamPermission>> {
            Ok(self.permissions.get(&(user_id, project_id)).copied())
        }
    }

    #[derive(Default)]
    struct FakeWebhookRepository {
        webhooks: Vec<Webhook>,
        fail: bool,
    }

    #[async_trait]
    impl WebhookRepository for FakeWebhookRepository {
        async fn list_for_environment(
            &self,
            environment_id: EnvironmentId,
        ) -> AppResult<Vec<Webhook>> {
            if self.fail {
                return Err(AppError::Internal("webhook store unavailable".to_owned()));
            }

            Ok(self
                .webhooks
                .iter()
                .filter(|webhook| webhook.environment_id() == environment_id)
                .cloned()
                .collect())
        }
    }

    #[derive(Default)]
    struct FakeSurveyRepository {
        surveys: Vec<Survey>,
        requested_limits: Mutex<Vec<usize>>,
    }

    #[async_trait]
    impl SurveyRepository for FakeSurveyRepository {
        async fn list_for_environment(
            &self,
            environment_id: EnvironmentId,
            limit: usize,
        ) -> AppResult<Vec<Survey>> {
            self.requested_limits.lock().await.push(limit);
            Ok(self
                .surveys
                .iter()
                .filter(|survey| survey.environment_id() == environment_id)
                .take(limit)
                .cloned()
                .collect())
        }
    }

    struct Harness {
        service: WebhookViewService,
        session: FakeSessionSource,
        environment_id: EnvironmentId,
        survey_repository: Arc<FakeSurveyRepository>,
    }

    struct Scenario {
        role: Option<OrganizationRole>,
        permission: Option<TeamPermission>,
        webhook_timestamps: Vec<DateTime<Utc>>,
        survey_count: usize,
        environment_present: bool,
        organization_present: bool,
        session_present: bool,
        webhook_store_fails: bool,
    }

    impl Default for Scenario {
        fn default() -> Self {
            Self {
                role: Some(OrganizationRole::Member),
                permission: Some(TeamPermission::Read),
                webhook_timestamps: Vec::new(),
                survey_count: 0,
                environment_present: true,
                organization_present: true,
                session_present: true,
                webhook_store_fails: false,
            }
        }
    }

    fn name(value: &str) -> NonEmptyString {
        NonEmptyString::new(value).unwrap_or_else(|_| unreachable!())
    }

    fn timestamp(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, hour, minute, 0)
            .single()
            .unwrap_or_else(|| unreachable!())
    }

    fn build(scenario: Scenario) -> Harness {
        let environment_id = EnvironmentId::new();
        let project_id = ProjectId::new();
        let organization_id = OrganizationId::new();
        let principal = UserIdentity::new(UserId::new(), "Alva Reyes", None);

        let mut environment_repository = FakeEnvironmentRepository::default();
        if scenario.environment_present {
            environment_repository.environments.insert(
                environment_id,
                Environment::new(environment_id, project_id, EnvironmentType::Production),
            );
        }

        let mut organization_repository = FakeOrganizationRepository::default();
        if scenario.organization_present {
            organization_repository.organizations.insert(
                environment_id,
                Organization::new(organization_id, name("Acme Research")),
            );
        }

        let mut membership_repository = FakeMembershipRepository::default();
        if let Some(role) = scenario.role {
            membership_repository
                .memberships
                .insert((principal.user_id(), organization_id), role);
        }

        let mut team_repository = FakeTeamRepository::default();
        if let Some(permission) = scenario.permission {
            team_repository
                .permissions
                .insert((principal.user_id(), project_id), permission);
        }

        let webhooks = scenario
            .webhook_timestamps
            .iter()
            .map(|created_at| {
                Webhook::new(
                    WebhookId::new(),
                    environment_id,
                    None,
                    name("https://hooks.example.com/responses"),
                    WebhookSource::User,
                    vec!["response_created".to_owned()],
                    Vec::new(),
                    *created_at,
                )
            })
            .collect();
        let webhook_repository = FakeWebhookRepository {
            webhooks,
            fail: scenario.webhook_store_fails,
        };

        let surveys = (0..scenario.survey_count)
            .map(|index| {
                Survey::new(
                    SurveyId::new(),
                    environment_id,
                    name(&format!("Survey {index}")),
                )
            })
            .collect();
        let survey_repository = Arc::new(FakeSurveyRepository {
            surveys,
            requested_limits: Mutex::new(Vec::new()),
        });

        let access_service =
            AccessService::new(Arc::new(membership_repository), Arc::new(team_repository));
        let service = WebhookViewService::new(
            access_service,
            Arc::new(environment_repository),
            Arc::new(organization_repository),
            Arc::new(webhook_repository),
            survey_repository.clone(),
        );

        let session = FakeSessionSource {
            identity: scenario.session_present.then(|| principal.clone()),
        };

        Harness {
            service,
            session,
            environment_id,
            survey_repository,
        }
    }

    #[tokio::test]
    async fn orders_webhooks_most_recent_first() {
        let harness = build(Scenario {
            webhook_timestamps: vec![timestamp(10, 0), timestamp(10, 5), timestamp(10, 2)],
            ..Scenario::default()
        });

        let overview = harness
            .service
            .webhook_overview(&harness.session, harness.environment_id)
            .await;

        let timestamps: Vec<_> = overview
            .iter()
            .flat_map(|view| view.webhooks.iter().map(|webhook| webhook.created_at()))
            .collect();
        assert_eq!(
            timestamps,
            vec![timestamp(10, 5), timestamp(10, 2), timestamp(10, 0)]
        );
    }

    #[tokio::test]
    async fn member_with_read_access_sees_read_only_view() {
        let harness = build(Scenario {
            webhook_timestamps: vec![timestamp(10, 0), timestamp(10, 5), timestamp(10, 2)],
            ..Scenario::default()
        });

        let overview = harness
            .service
            .webhook_overview(&harness.session, harness.environment_id)
            .await;

        assert_eq!(overview.map(|view| view.is_read_only).ok(), Some(true));
    }

    #[tokio::test]
    async fn manager_sees_mutable_view() {
        let harness = build(Scenario {
            role: Some(OrganizationRole::Manager),
            permission: None,
            ..Scenario::default()
        });

        let overview = harness
            .service
            .webhook_overview(&harness.session, harness.environment_id)
            .await;

        assert_eq!(overview.map(|view| view.is_read_only).ok(), Some(false));
    }

    #[tokio::test]
    async fn missing_session_is_unauthorized() {
        let harness = build(Scenario {
            session_present: false,
            ..Scenario::default()
        });

        let result = harness
            .service
            .webhook_overview(&harness.session, harness.environment_id)
            .await;

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn missing_environment_is_not_found() {
        let harness = build(Scenario {
            environment_present: false,
            ..Scenario::default()
        });

        let result = harness
            .service
            .webhook_overview(&harness.session, harness.environment_id)
            .await;

        let message = result.err().map(|error| error.to_string()).unwrap_or_default();
        assert!(message.contains("environment"), "got: {message}");
        assert!(message.starts_with("not found"), "got: {message}");
    }

    #[tokio::test]
    async fn missing_organization_is_not_found() {
        let harness = build(Scenario {
            organization_present: false,
            ..Scenario::default()
        });

        let result = harness
            .service
            .webhook_overview(&harness.session, harness.environment_id)
            .await;

        let message = result.err().map(|error| error.to_string()).unwrap_or_default();
        assert!(message.contains("organization"), "got: {message}");
    }

    #[tokio::test]
    async fn upstream_store_failure_is_terminal() {
        let harness = build(Scenario {
            webhook_store_fails: true,
            ..Scenario::default()
        });

        let result = harness
            .service
            .webhook_overview(&harness.session, harness.environment_id)
            .await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn survey_fetch_is_capped_at_default_limit() {
        let harness = build(Scenario {
            survey_count: 500,
            ..Scenario::default()
        });

        let overview = harness
            .service
            .webhook_overview(&harness.session, harness.environment_id)
            .await;

        assert_eq!(overview.map(|view| view.surveys.len()).ok(), Some(200));
        let limits = harness.survey_repository.requested_limits.lock().await;
        assert_eq!(limits.as_slice(), &[200]);
    }

    #[tokio::test]
    async fn assembly_is_idempotent_under_unchanged_state() {
        let harness = build(Scenario {
            webhook_timestamps: vec![timestamp(9, 30), timestamp(11, 15), timestamp(10, 45)],
            survey_count: 3,
            ..Scenario::default()
        });

        let first = harness
            .service
            .webhook_overview(&harness.session, harness.environment_id)
            .await;
        let second = harness
            .service
            .webhook_overview(&harness.session, harness.environment_id)
            .await;

        assert_eq!(first.ok(), second.ok());
    }
}
