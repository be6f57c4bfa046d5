use pollsmith_application::WebhookOverview;
use pollsmith_domain::{Environment, Survey, Webhook};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

/// Development login request issued against the bootstrap-guarded route.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/dev-login-request.ts"
)]
pub struct DevLoginRequest {
    pub user_id: String,
    pub display_name: String,
    pub email: Option<String>,
}

/// API representation of an environment.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/environment-response.ts"
)]
pub struct EnvironmentResponse {
    pub id: String,
    pub project_id: String,
    pub environment_type: String,
}

impl From<Environment> for EnvironmentResponse {
    fn from(value: Environment) -> Self {
        Self {
            id: value.id().to_string(),
            project_id: value.project_id().to_string(),
            environment_type: value.environment_type().as_str().to_owned(),
        }
    }
}

/// API representation of a webhook registration.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/webhook-response.ts"
)]
pub struct WebhookResponse {
    pub id: String,
    pub name: Option<String>,
    pub url: String,
    pub source: String,
    pub triggers: Vec<String>,
    pub survey_ids: Vec<String>,
    pub created_at: String,
}

impl From<Webhook> for WebhookResponse {
    fn from(value: Webhook) -> Self {
        Self {
            id: value.id().to_string(),
            name: value.name().map(ToOwned::to_owned),
            url: value.url().to_owned(),
            source: value.source().as_str().to_owned(),
            triggers: value.triggers().to_vec(),
            survey_ids: value
                .survey_ids()
                .iter()
                .map(ToString::to_string)
                .collect(),
            created_at: value.created_at().to_rfc3339(),
        }
    }
}

/// API representation of a survey used for trigger cross-referencing.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/survey-response.ts"
)]
pub struct SurveyResponse {
    pub id: String,
    pub name: String,
}

impl From<Survey> for SurveyResponse {
    fn from(value: Survey) -> Self {
        Self {
            id: value.id().to_string(),
            name: value.name().to_owned(),
        }
    }
}

/// Webhook integrations overview payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/webhook-overview-response.ts"
)]
pub struct WebhookOverviewResponse {
    pub webhooks: Vec<WebhookResponse>,
    pub surveys: Vec<SurveyResponse>,
    pub environment: EnvironmentResponse,
    pub is_read_only: bool,
}

impl From<WebhookOverview> for WebhookOverviewResponse {
    fn from(value: WebhookOverview) -> Self {
        Self {
            webhooks: value.webhooks.into_iter().map(WebhookResponse::from).collect(),
            surveys: value.surveys.into_iter().map(SurveyResponse::from).collect(),
            environment: EnvironmentResponse::from(value.environment),
            is_read_only: value.is_read_only,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pollsmith_application::WebhookOverview;
    use pollsmith_core::NonEmptyString;
    use pollsmith_domain::{
        Environment, EnvironmentId, EnvironmentType, ProjectId, Webhook, WebhookId, WebhookSource,
    };

    use super::WebhookOverviewResponse;

    #[test]
    fn overview_serializes_with_stable_field_names() {
        let environment_id = EnvironmentId::new();
        let created_at = Utc
            .with_ymd_and_hms(2026, 3, 14, 10, 5, 0)
            .single()
            .unwrap_or_else(|| unreachable!());
        let url = NonEmptyString::new("https://hooks.example.com/responses")
            .unwrap_or_else(|_| unreachable!());

        let overview = WebhookOverview {
            webhooks: vec![Webhook::new(
                WebhookId::new(),
                environment_id,
                None,
                url,
                WebhookSource::Zapier,
                vec!["response_created".to_owned()],
                Vec::new(),
                created_at,
            )],
            surveys: Vec::new(),
            environment: Environment::new(
                environment_id,
                ProjectId::new(),
                EnvironmentType::Development,
            ),
            is_read_only: true,
        };

        let payload = serde_json::to_value(WebhookOverviewResponse::from(overview));
        let payload = match payload {
            Ok(payload) => payload,
            Err(error) => panic!("serialization failed: {error}"),
        };

        assert_eq!(payload["is_read_only"], serde_json::json!(true));
        assert_eq!(payload["webhooks"][0]["source"], serde_json::json!("zapier"));
        assert_eq!(
            payload["environment"]["environment_type"],
            serde_json::json!("development")
        );
    }
}
