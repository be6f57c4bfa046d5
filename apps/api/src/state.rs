use pollsmith_application::WebhookViewService;
use sqlx::PgPool;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub webhook_view_service: WebhookViewService,
    pub pool: PgPool,
    pub bootstrap_token: String,
}
