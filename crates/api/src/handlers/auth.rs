//! Handlers for the `/auth` resource (register, login, logout, profile,
//! password change).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use repairdesk_db::models::user::UserResponse;
use repairdesk_db::ownership::validate_input;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::cookie::{clear_session_cookie, session_cookie};
use crate::auth::session::{Registration, Session};
use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        length(min = 3, max = 50, message = "username must be 3-50 characters"),
        does_not_contain(pattern = "@", message = "username must not contain '@'")
    )]
    pub username: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/login`.
///
/// The identifier may be sent as `identifier`, `username` or `email`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(alias = "username", alias = "email")]
    pub identifier: String,
    pub password: String,
}

/// Request body for `PUT /auth/password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    /// Session lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct PasswordChanged {
    pub changed: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an account. Returns 201 with a session token and sets the session cookie.
pub async fn register(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;

    let session = state
        .auth
        .register(&Registration {
            username: input.username.trim().to_string(),
            email: input.email.trim().to_lowercase(),
            password: input.password,
        })
        .await?;

    let (cookie, body) = session_response(&state, session)?;
    Ok((StatusCode::CREATED, [(SET_COOKIE, cookie)], Json(body)))
}

/// POST /api/v1/auth/login
///
/// Authenticate with username or email plus password.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let identifier = input.identifier.trim();
    if identifier.is_empty() || input.password.is_empty() {
        return Err(AppError::BadRequest(
            "identifier and password are required".to_string(),
        ));
    }
    let identifier = if identifier.contains('@') {
        identifier.to_lowercase()
    } else {
        identifier.to_string()
    };

    let session = state.auth.login(&identifier, &input.password).await?;

    let (cookie, body) = session_response(&state, session)?;
    Ok(([(SET_COOKIE, cookie)], Json(body)))
}

/// POST /api/v1/auth/logout
///
/// Clear the session cookie. Tokens are stateless and simply expire.
pub async fn logout(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let cookie = clear_session_cookie(state.config.is_production())?;
    Ok((StatusCode::NO_CONTENT, [(SET_COOKIE, cookie)]))
}

/// GET /api/v1/auth/me
pub async fn me(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let user = state.auth.load_user(auth.user_id()).await?;
    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

/// PUT /api/v1/auth/password
///
/// Change the caller's password. The stored hash is rewritten only when the
/// new password differs from the current one.
pub async fn change_password(
    auth: AuthUser,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<ChangePasswordRequest>,
) -> AppResult<impl IntoResponse> {
    let changed = state
        .auth
        .set_password(&auth.identity, &input.current_password, &input.new_password)
        .await?;

    Ok(Json(DataResponse {
        data: PasswordChanged { changed },
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn session_response(
    state: &AppState,
    session: Session,
) -> AppResult<(HeaderValue, AuthResponse)> {
    let expires_in = state.auth.jwt().session_expiry_secs();
    let cookie = session_cookie(&session.token, expires_in, state.config.is_production())?;
    Ok((
        cookie,
        AuthResponse {
            token: session.token,
            expires_in,
            user: UserResponse::from(&session.user),
        },
    ))
}
