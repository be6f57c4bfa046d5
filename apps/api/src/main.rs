//! Pollsmith API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod dev_seed;
mod dto;
mod error;
mod handlers;
mod session;
mod state;

use std::sync::Arc;

use pollsmith_application::{AccessService, WebhookViewService};
use pollsmith_core::AppError;
use pollsmith_infrastructure::{
    PostgresScopeRepository, PostgresSurveyRepository, PostgresWebhookRepository,
};
use sqlx::postgres::PgPoolOptions;
use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;
use tracing::info;

use crate::api_config::ApiConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    api_config::init_tracing();

    let config = ApiConfig::load()?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))?;

    sqlx::migrate!("../../crates/infrastructure/migrations")
        .run(&pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

    if config.migrate_only {
        info!("database migrations applied successfully");
        return Ok(());
    }

    if config.seed {
        dev_seed::run(&pool).await?;
        info!("development data seeded");
        return Ok(());
    }

    let session_store = PostgresStore::new(pool.clone())
        .with_table_name("tower_sessions")
        .map_err(|error| {
            AppError::Validation(format!("invalid session table name configuration: {error}"))
        })?;
    session_store.migrate().await.map_err(|error| {
        AppError::Internal(format!("failed to initialize session store: {error}"))
    })?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(config.cookie_secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(30)));

    let scope_repository = Arc::new(PostgresScopeRepository::new(pool.clone()));
    let access_service =
        AccessService::new(scope_repository.clone(), scope_repository.clone());
    let webhook_view_service = WebhookViewService::with_survey_limit(
        access_service,
        scope_repository.clone(),
        scope_repository,
        Arc::new(PostgresWebhookRepository::new(pool.clone())),
        Arc::new(PostgresSurveyRepository::new(pool.clone())),
        config.survey_fetch_limit,
    );

    let app_state = AppState {
        webhook_view_service,
        pool,
        bootstrap_token: config.bootstrap_token.clone(),
    };

    let router = api_router::build_router(app_state, &config.frontend_url, session_layer)?;

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind {address}: {error}")))?;
    info!(%address, "pollsmith api listening");

    axum::serve(listener, router)
        .await
        .map_err(|error| AppError::Internal(format!("server error: {error}")))?;

    Ok(())
}
