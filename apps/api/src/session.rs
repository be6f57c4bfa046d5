use async_trait::async_trait;
use pollsmith_application::SessionSource;
use pollsmith_core::{AppError, AppResult, UserIdentity};
use tower_sessions::Session;

/// Session key the authenticated identity is stored under.
pub const SESSION_USER_KEY: &str = "pollsmith.user";

/// Adapter exposing the request session as the application's session port.
///
/// Constructed per request from the extracted session and passed into the
/// assembly as an explicit argument.
pub struct HttpSessionSource {
    session: Session,
}

impl HttpSessionSource {
    /// Wraps an extracted request session.
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

#[async_trait]
impl SessionSource for HttpSessionSource {
    async fn current_identity(&self) -> AppResult<Option<UserIdentity>> {
        self.session
            .get::<UserIdentity>(SESSION_USER_KEY)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to read session identity: {error}"))
            })
    }
}
