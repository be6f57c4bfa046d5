use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use pollsmith_core::{AppError, UserId, UserIdentity};
use tower_sessions::Session;
use uuid::Uuid;

use crate::api_router::BOOTSTRAP_TOKEN_HEADER;
use crate::dto::DevLoginRequest;
use crate::error::ApiResult;
use crate::session::SESSION_USER_KEY;
use crate::state::AppState;

/// Issues a session for development and testing.
///
/// The real login flow is owned by the external auth service; this route only
/// exists so a locally seeded user can obtain a session, and it is guarded by
/// the bootstrap token.
pub async fn dev_login_handler(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Json(payload): Json<DevLoginRequest>,
) -> ApiResult<StatusCode> {
    let provided = headers
        .get(BOOTSTRAP_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    if provided.is_empty() || provided != state.bootstrap_token {
        return Err(AppError::Unauthorized("invalid bootstrap token".to_owned()).into());
    }

    let user_id = Uuid::parse_str(&payload.user_id)
        .map(UserId::from_uuid)
        .map_err(|error| AppError::Validation(format!("invalid user id: {error}")))?;
    let identity = UserIdentity::new(user_id, payload.display_name, payload.email);

    session
        .insert(SESSION_USER_KEY, identity)
        .await
        .map_err(|error| AppError::Internal(format!("failed to write session: {error}")))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Terminates the current session.
pub async fn logout_handler(session: Session) -> ApiResult<StatusCode> {
    session
        .flush()
        .await
        .map_err(|error| AppError::Internal(format!("failed to clear session: {error}")))?;

    Ok(StatusCode::NO_CONTENT)
}
