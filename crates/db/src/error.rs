//! Storage-boundary failures and their mapping onto [`CoreError`].

use repairdesk_core::error::CoreError;

/// PostgreSQL `unique_violation`.
const PG_UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL `foreign_key_violation`.
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";
/// PostgreSQL `not_null_violation`.
const PG_NOT_NULL_VIOLATION: &str = "23502";
/// PostgreSQL `check_violation`.
const PG_CHECK_VIOLATION: &str = "23514";

/// Errors raised by an [`EntityStore`](crate::store::EntityStore).
///
/// Not-found is not an error here: lookups return `Option` and deletes
/// return `bool`, so "absent" never gets confused with "invalid".
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint was violated; carries the constraint name.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// A required field, check constraint or reference was rejected.
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("database error: {0}")]
    Database(sqlx::Error),

    /// The store could not be reached at all.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) => {
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                match db_err.code().as_deref() {
                    Some(PG_UNIQUE_VIOLATION) => Self::UniqueViolation(constraint),
                    Some(PG_CHECK_VIOLATION)
                    | Some(PG_NOT_NULL_VIOLATION)
                    | Some(PG_FOREIGN_KEY_VIOLATION) => {
                        Self::Validation(format!("constraint {constraint} rejected the value"))
                    }
                    _ => Self::Database(err),
                }
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::Unavailable(err.to_string())
            }
            _ => Self::Database(err),
        }
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation(constraint) => CoreError::Conflict(format!(
                "Duplicate value violates unique constraint: {constraint}"
            )),
            StoreError::Validation(msg) => CoreError::Validation(msg),
            other => {
                tracing::error!(error = %other, "Entity store failure");
                CoreError::Internal(other.to_string())
            }
        }
    }
}
