//! Development data seed: one organization with a production environment,
//! an owner, and a restricted member holding read-only project access.

use chrono::{Duration, Utc};
use pollsmith_core::{AppError, AppResult};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

const DEV_SEED_ORGANIZATION_ID: &str = "11111111-1111-1111-1111-111111111111";
const DEV_SEED_ORGANIZATION_NAME: &str = "Lakeside Research Collective";
const DEV_SEED_PROJECT_ID: &str = "22222222-2222-2222-2222-222222222222";
const DEV_SEED_PROJECT_NAME: &str = "Customer Pulse";
const DEV_SEED_PRODUCTION_ENVIRONMENT_ID: &str = "33333333-3333-3333-3333-333333333333";
const DEV_SEED_DEVELOPMENT_ENVIRONMENT_ID: &str = "44444444-4444-4444-4444-444444444444";

const DEV_SEED_OWNER_USER_ID: &str = "a2c8ea5f-4f39-4724-97f5-932f97f54f76";
const DEV_SEED_OWNER_NAME: &str = "Org Owner";
const DEV_SEED_OWNER_EMAIL: &str = "owner@pollsmith.local";
const DEV_SEED_MEMBER_USER_ID: &str = "96d11e90-7403-4654-9727-cb1043f8bd31";
const DEV_SEED_MEMBER_NAME: &str = "Restricted Member";
const DEV_SEED_MEMBER_EMAIL: &str = "member@pollsmith.local";

pub async fn run(pool: &PgPool) -> AppResult<()> {
    let organization_id = parse_uuid_const(DEV_SEED_ORGANIZATION_ID, "DEV_SEED_ORGANIZATION_ID")?;
    let project_id = parse_uuid_const(DEV_SEED_PROJECT_ID, "DEV_SEED_PROJECT_ID")?;
    let production_environment_id = parse_uuid_const(
        DEV_SEED_PRODUCTION_ENVIRONMENT_ID,
        "DEV_SEED_PRODUCTION_ENVIRONMENT_ID",
    )?;
    let development_environment_id = parse_uuid_const(
        DEV_SEED_DEVELOPMENT_ENVIRONMENT_ID,
        "DEV_SEED_DEVELOPMENT_ENVIRONMENT_ID",
    )?;
    let owner_user_id = parse_uuid_const(DEV_SEED_OWNER_USER_ID, "DEV_SEED_OWNER_USER_ID")?;
    let member_user_id = parse_uuid_const(DEV_SEED_MEMBER_USER_ID, "DEV_SEED_MEMBER_USER_ID")?;

    execute(
        sqlx::query(
            r#"
            INSERT INTO organizations (id, name)
            VALUES ($1, $2)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(organization_id)
        .bind(DEV_SEED_ORGANIZATION_NAME),
        pool,
        "organization",
    )
    .await?;

    execute(
        sqlx::query(
            r#"
            INSERT INTO projects (id, organization_id, name)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(project_id)
        .bind(organization_id)
        .bind(DEV_SEED_PROJECT_NAME),
        pool,
        "project",
    )
    .await?;

    for (environment_id, environment_type) in [
        (production_environment_id, "production"),
        (development_environment_id, "development"),
    ] {
        execute(
            sqlx::query(
                r#"
                INSERT INTO environments (id, project_id, environment_type)
                VALUES ($1, $2, $3)
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(environment_id)
            .bind(project_id)
            .bind(environment_type),
            pool,
            "environment",
        )
        .await?;
    }

    for (user_id, display_name, email, role) in [
        (owner_user_id, DEV_SEED_OWNER_NAME, DEV_SEED_OWNER_EMAIL, "owner"),
        (
            member_user_id,
            DEV_SEED_MEMBER_NAME,
            DEV_SEED_MEMBER_EMAIL,
            "member",
        ),
    ] {
        execute(
            sqlx::query(
                r#"
                INSERT INTO users (id, display_name, email)
                VALUES ($1, $2, $3)
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(user_id)
            .bind(display_name)
            .bind(email),
            pool,
            "user",
        )
        .await?;

        execute(
            sqlx::query(
                r#"
                INSERT INTO memberships (user_id, organization_id, role)
                VALUES ($1, $2, $3)
                ON CONFLICT (user_id, organization_id) DO NOTHING
                "#,
            )
            .bind(user_id)
            .bind(organization_id)
            .bind(role),
            pool,
            "membership",
        )
        .await?;
    }

    execute(
        sqlx::query(
            r#"
            INSERT INTO project_team_permissions (user_id, project_id, permission)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, project_id) DO NOTHING
            "#,
        )
        .bind(member_user_id)
        .bind(project_id)
        .bind("read"),
        pool,
        "project permission",
    )
    .await?;

    let now = Utc::now();
    for (webhook_id, offset_minutes, name, trigger) in [
        (
            "55555555-5555-5555-5555-555555555551",
            65_i64,
            "Response archive",
            "response_finished",
        ),
        (
            "55555555-5555-5555-5555-555555555552",
            60,
            "Ops notifier",
            "response_created",
        ),
        (
            "55555555-5555-5555-5555-555555555553",
            63,
            "CRM bridge",
            "response_updated",
        ),
    ] {
        execute(
            sqlx::query(
                r#"
                INSERT INTO webhooks (id, environment_id, name, url, source, triggers, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(parse_uuid_const(webhook_id, "dev seed webhook id")?)
            .bind(production_environment_id)
            .bind(name)
            .bind("https://hooks.pollsmith.local/inbound")
            .bind("user")
            .bind(vec![trigger.to_owned()])
            .bind(now - Duration::minutes(offset_minutes)),
            pool,
            "webhook",
        )
        .await?;
    }

    for (survey_id, name) in [
        ("66666666-6666-6666-6666-666666666661", "Quarterly NPS"),
        ("66666666-6666-6666-6666-666666666662", "Onboarding Feedback"),
    ] {
        execute(
            sqlx::query(
                r#"
                INSERT INTO surveys (id, environment_id, name)
                VALUES ($1, $2, $3)
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(parse_uuid_const(survey_id, "dev seed survey id")?)
            .bind(production_environment_id)
            .bind(name),
            pool,
            "survey",
        )
        .await?;
    }

    info!(
        environment = DEV_SEED_PRODUCTION_ENVIRONMENT_ID,
        "seeded development organization and webhook fixtures"
    );

    Ok(())
}

async fn execute(
    query: sqlx::query::Query<'_, sqlx::Postgres, sqlx::postgres::PgArguments>,
    pool: &PgPool,
    label: &str,
) -> AppResult<()> {
    query
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(|error| AppError::Internal(format!("failed to seed {label}: {error}")))
}

fn parse_uuid_const(value: &str, name: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|error| AppError::Internal(format!("invalid {name}: {error}")))
}
