use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use pollsmith_core::{AppError, NonEmptyString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EnvironmentId, SurveyId};

/// Unique identifier for a webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WebhookId(Uuid);

impl WebhookId {
    /// Creates a random webhook identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a webhook identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for WebhookId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for WebhookId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Origin that registered a webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookSource {
    /// Registered directly by a user.
    User,
    /// Registered through the Zapier integration.
    Zapier,
    /// Registered through the Make integration.
    Make,
    /// Registered through the n8n integration.
    N8n,
}

impl WebhookSource {
    /// Returns a stable storage value for this source.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Zapier => "zapier",
            Self::Make => "make",
            Self::N8n => "n8n",
        }
    }
}

impl FromStr for WebhookSource {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user" => Ok(Self::User),
            "zapier" => Ok(Self::Zapier),
            "make" => Ok(Self::Make),
            "n8n" => Ok(Self::N8n),
            _ => Err(AppError::Validation(format!(
                "unknown webhook source '{value}'"
            ))),
        }
    }
}

/// Webhook registration scoped to an environment.
///
/// The delivery configuration (url, triggers, targeted surveys) is opaque to
/// access resolution; the overview only orders by `created_at` and passes the
/// rest through for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Webhook {
    id: WebhookId,
    environment_id: EnvironmentId,
    name: Option<NonEmptyString>,
    url: NonEmptyString,
    source: WebhookSource,
    triggers: Vec<String>,
    survey_ids: Vec<SurveyId>,
    created_at: DateTime<Utc>,
}

impl Webhook {
    /// Creates a webhook registration.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: WebhookId,
        environment_id: EnvironmentId,
        name: Option<NonEmptyString>,
        url: NonEmptyString,
        source: WebhookSource,
        triggers: Vec<String>,
        survey_ids: Vec<SurveyId>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            environment_id,
            name,
            url,
            source,
            triggers,
            survey_ids,
            created_at,
        }
    }

    /// Returns the webhook identifier.
    #[must_use]
    pub fn id(&self) -> WebhookId {
        self.id
    }

    /// Returns the environment the webhook belongs to.
    #[must_use]
    pub fn environment_id(&self) -> EnvironmentId {
        self.environment_id
    }

    /// Returns the display name, if one was set.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_ref().map(NonEmptyString::as_str)
    }

    /// Returns the delivery endpoint.
    #[must_use]
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Returns the origin that registered the webhook.
    #[must_use]
    pub fn source(&self) -> WebhookSource {
        self.source
    }

    /// Returns the trigger names the webhook fires on.
    #[must_use]
    pub fn triggers(&self) -> &[String] {
        self.triggers.as_slice()
    }

    /// Returns the surveys the webhook is limited to; empty means all.
    #[must_use]
    pub fn survey_ids(&self) -> &[SurveyId] {
        self.survey_ids.as_slice()
    }

    /// Returns the registration timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::WebhookSource;

    #[test]
    fn source_roundtrip_storage_value() {
        for source in [
            WebhookSource::User,
            WebhookSource::Zapier,
            WebhookSource::Make,
            WebhookSource::N8n,
        ] {
            let restored = WebhookSource::from_str(source.as_str());
            assert_eq!(restored.ok(), Some(source));
        }
    }

    #[test]
    fn unknown_source_is_rejected() {
        assert!(WebhookSource::from_str("ifttt").is_err());
    }
}
