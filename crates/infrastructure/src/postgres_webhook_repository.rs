use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pollsmith_application::WebhookRepository;
use pollsmith_core::{AppError, AppResult, NonEmptyString};
use pollsmith_domain::{EnvironmentId, SurveyId, Webhook, WebhookId, WebhookSource};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// PostgreSQL-backed webhook listings.
#[derive(Clone)]
pub struct PostgresWebhookRepository {
    pool: PgPool,
}

impl PostgresWebhookRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WebhookRepository for PostgresWebhookRepository {
    async fn list_for_environment(
        &self,
        environment_id: EnvironmentId,
    ) -> AppResult<Vec<Webhook>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, url, source, triggers, survey_ids, created_at
            FROM webhooks
            WHERE environment_id = $1
            "#,
        )
        .bind(environment_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list webhooks: {error}")))?;

        rows.into_iter()
            .map(|row| decode_webhook(environment_id, &row))
            .collect()
    }
}

fn decode_webhook(environment_id: EnvironmentId, row: &PgRow) -> AppResult<Webhook> {
    let id = column::<Uuid>(row, "id")?;
    let name = column::<Option<String>>(row, "name")?
        .map(NonEmptyString::new)
        .transpose()?;
    let url = NonEmptyString::new(column::<String>(row, "url")?)?;
    let source = column::<String>(row, "source")?.parse::<WebhookSource>()?;
    let triggers = column::<Vec<String>>(row, "triggers")?;
    let survey_ids = column::<Vec<Uuid>>(row, "survey_ids")?
        .into_iter()
        .map(SurveyId::from_uuid)
        .collect();
    let created_at = column::<DateTime<Utc>>(row, "created_at")?;

    Ok(Webhook::new(
        WebhookId::from_uuid(id),
        environment_id,
        name,
        url,
        source,
        triggers,
        survey_ids,
        created_at,
    ))
}

fn column<'row, T>(row: &'row PgRow, name: &str) -> AppResult<T>
where
    T: sqlx::Decode<'row, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get::<T, _>(name)
        .map_err(|error| AppError::Internal(format!("invalid webhook row ({name}): {error}")))
}
