//! Session-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use repairdesk_core::error::AuthError;
use repairdesk_core::ownership::UserIdentity;
use repairdesk_core::types::DbId;

use crate::auth::cookie::session_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller, resolved from a `Bearer` header or the session cookie.
///
/// Use this as an extractor parameter in any handler that requires authentication:
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = auth.user_id(), "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// The token is verified and its user looked up before the handler runs, so
/// an unauthenticated request never reaches the data layer.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub identity: UserIdentity,
}

impl AuthUser {
    pub fn user_id(&self) -> DbId {
        self.identity.id
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let result = match session_token(&parts.headers) {
            Some(token) => state.auth.authenticate(&token).await,
            None => Err(AuthError::MissingToken),
        };

        match result {
            Ok(identity) => Ok(AuthUser { identity }),
            Err(err) => {
                tracing::warn!(
                    kind = err.kind(),
                    path = %parts.uri.path(),
                    "Authentication failed"
                );
                Err(err.into())
            }
        }
    }
}
