use async_trait::async_trait;
use pollsmith_application::SurveyRepository;
use pollsmith_core::{AppError, AppResult, NonEmptyString};
use pollsmith_domain::{EnvironmentId, Survey, SurveyId};
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// PostgreSQL-backed survey listings.
#[derive(Clone)]
pub struct PostgresSurveyRepository {
    pool: PgPool,
}

impl PostgresSurveyRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SurveyRepository for PostgresSurveyRepository {
    async fn list_for_environment(
        &self,
        environment_id: EnvironmentId,
        limit: usize,
    ) -> AppResult<Vec<Survey>> {
        let limit = i64::try_from(limit)
            .map_err(|error| AppError::Validation(format!("invalid survey limit: {error}")))?;

        let rows = sqlx::query(
            r#"
            SELECT id, name
            FROM surveys
            WHERE environment_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(environment_id.as_uuid())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list surveys: {error}")))?;

        rows.into_iter()
            .map(|row| {
                let id = row
                    .try_get::<Uuid, _>("id")
                    .map_err(|error| AppError::Internal(format!("invalid survey row: {error}")))?;
                let name = row
                    .try_get::<String, _>("name")
                    .map_err(|error| AppError::Internal(format!("invalid survey row: {error}")))?;

                Ok(Survey::new(
                    SurveyId::from_uuid(id),
                    environment_id,
                    NonEmptyString::new(name)?,
                ))
            })
            .collect()
    }
}
