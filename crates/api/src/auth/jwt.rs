//! Session token generation and validation.
//!
//! Session tokens are HS256-signed JWTs carrying a [`Claims`] payload. They
//! are stateless: nothing is persisted server-side, and validation never
//! extends a token's lifetime.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use repairdesk_core::error::AuthError;
use repairdesk_core::types::DbId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default session lifetime in minutes (24 hours).
pub const DEFAULT_SESSION_EXPIRY_MINS: i64 = 24 * 60;

/// JWT claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4) for audit.
    pub jti: String,
}

/// Configuration for session token signing and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Session lifetime in minutes.
    pub session_expiry_mins: i64,
}

impl JwtConfig {
    /// Session lifetime in seconds, as used for the cookie `Max-Age`.
    pub fn session_expiry_secs(&self) -> i64 {
        self.session_expiry_mins * 60
    }
}

/// Generate an HS256 session token for the given user.
pub fn generate_session_token(
    user_id: DbId,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: user_id,
        exp: now + config.session_expiry_secs(),
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a session token, returning the embedded [`Claims`].
///
/// The signature is checked before the payload is parsed, so a forged token
/// is always `InvalidToken` regardless of its contents.
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, AuthError> {
    // HS256, validates exp. No leeway: a token is dead the second it expires.
    let mut validation = Validation::default();
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| classify(e.kind()))
}

fn classify(kind: &ErrorKind) -> AuthError {
    match kind {
        ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
        ErrorKind::InvalidSignature
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::ImmatureSignature => AuthError::InvalidToken,
        _ => AuthError::MalformedToken,
    }
}
