use axum::Json;
use axum::extract::{Path, State};
use pollsmith_domain::EnvironmentId;
use tower_sessions::Session;
use uuid::Uuid;

use crate::dto::WebhookOverviewResponse;
use crate::error::ApiResult;
use crate::session::HttpSessionSource;
use crate::state::AppState;

/// Returns the webhook integrations overview for an environment.
///
/// Session validation happens inside the assembly (as one of its concurrent
/// fetches), so this route is registered without auth middleware.
pub async fn webhook_overview_handler(
    State(state): State<AppState>,
    session: Session,
    Path(environment_id): Path<Uuid>,
) -> ApiResult<Json<WebhookOverviewResponse>> {
    let session_source = HttpSessionSource::new(session);

    let overview = state
        .webhook_view_service
        .webhook_overview(&session_source, EnvironmentId::from_uuid(environment_id))
        .await?;

    Ok(Json(WebhookOverviewResponse::from(overview)))
}
