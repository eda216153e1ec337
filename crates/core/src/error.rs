use crate::types::DbId;

/// Domain-level failures shared by the store, the ownership layer and handlers.
///
/// There is no `Forbidden` variant: a record owned by someone else is reported
/// exactly like a record that does not exist.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failures of the session authenticator.
///
/// Token failures are kept apart so monitoring can tell tampering
/// (`InvalidToken`) from revocation (`UserNotFound`) and expiry.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Authentication required")]
    MissingToken,

    #[error("Invalid session token")]
    InvalidToken,

    #[error("Session token has expired")]
    ExpiredToken,

    #[error("Malformed session token")]
    MalformedToken,

    #[error("User no longer exists")]
    UserNotFound,

    /// Returned for both an unknown account and a wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("An account with this username or email already exists")]
    DuplicateAccount,

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl AuthError {
    /// Short machine-readable label used in logs and response codes.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingToken => "missing_token",
            Self::InvalidToken => "invalid_token",
            Self::ExpiredToken => "expired_token",
            Self::MalformedToken => "malformed_token",
            Self::UserNotFound => "user_not_found",
            Self::InvalidCredentials => "invalid_credentials",
            Self::DuplicateAccount => "duplicate_account",
            Self::Core(_) => "core",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display_names_entity_and_id() {
        let err = CoreError::NotFound {
            entity: "Customer",
            id: 9,
        };
        assert_eq!(err.to_string(), "Entity not found: Customer with id 9");
    }

    #[test]
    fn auth_error_wraps_core_error_transparently() {
        let err: AuthError = CoreError::Validation("email is invalid".into()).into();
        assert_eq!(err.to_string(), "Validation failed: email is invalid");
        assert_eq!(err.kind(), "core");
    }

    #[test]
    fn token_failures_have_distinct_kinds() {
        let kinds = [
            AuthError::InvalidToken.kind(),
            AuthError::ExpiredToken.kind(),
            AuthError::MalformedToken.kind(),
            AuthError::UserNotFound.kind(),
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
