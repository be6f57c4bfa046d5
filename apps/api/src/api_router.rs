use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, HeaderValue, Method};
use axum::routing::{get, post};
use pollsmith_core::AppError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tower_sessions::SessionManagerLayer;
use tower_sessions_sqlx_store::PostgresStore;

use crate::handlers;
use crate::state::AppState;

/// Header carrying the bootstrap token for the dev login route.
pub const BOOTSTRAP_TOKEN_HEADER: &str = "x-bootstrap-token";

/// Builds the API router with CORS, tracing, and session layers.
pub fn build_router(
    app_state: AppState,
    frontend_url: &str,
    session_layer: SessionManagerLayer<PostgresStore>,
) -> Result<Router, AppError> {
    let allowed_origin = frontend_url
        .parse::<HeaderValue>()
        .map_err(|error| AppError::Validation(format!("invalid FRONTEND_URL: {error}")))?;

    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            CONTENT_TYPE,
            HeaderName::from_static(BOOTSTRAP_TOKEN_HEADER),
        ])
        .allow_credentials(true);

    // The overview route carries no auth middleware: the session lookup is
    // one of the five concurrent fetches inside the assembly itself.
    Ok(Router::new()
        .route("/api/health", get(handlers::health::health_handler))
        .route(
            "/api/auth/dev-login",
            post(handlers::auth::dev_login_handler),
        )
        .route("/api/auth/logout", post(handlers::auth::logout_handler))
        .route(
            "/api/environments/{environment_id}/integrations/webhooks",
            get(handlers::integrations::webhook_overview_handler),
        )
        .layer(session_layer)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state))
}
