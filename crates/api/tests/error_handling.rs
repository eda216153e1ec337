//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no router needed.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use repairdesk_api::error::{AppError, INTERNAL_MESSAGE};
use repairdesk_core::error::{AuthError, CoreError};

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// CoreError variants
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Repair",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Repair with id 42 not found");
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("estimated_cost must not be negative".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "estimated_cost must not be negative");
}

#[tokio::test]
async fn conflict_error_returns_409() {
    let err = AppError::Core(CoreError::Conflict("Customer already registered".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn internal_error_hides_detail() {
    let err = AppError::Core(CoreError::Internal(
        "connection refused at 10.0.0.3:5432".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], INTERNAL_MESSAGE);
}

// ---------------------------------------------------------------------------
// AuthError variants
// ---------------------------------------------------------------------------

#[tokio::test]
async fn auth_failures_carry_distinct_codes() {
    let cases = [
        (AuthError::InvalidToken, "INVALID_TOKEN"),
        (AuthError::ExpiredToken, "TOKEN_EXPIRED"),
        (AuthError::MalformedToken, "MALFORMED_TOKEN"),
        (AuthError::UserNotFound, "USER_NOT_FOUND"),
        (AuthError::MissingToken, "UNAUTHORIZED"),
        (AuthError::InvalidCredentials, "INVALID_CREDENTIALS"),
    ];

    for (err, code) in cases {
        let (status, json) = error_to_response(err.into()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["code"], code);
    }
}

#[tokio::test]
async fn duplicate_account_returns_409() {
    let (status, json) = error_to_response(AuthError::DuplicateAccount.into()).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "DUPLICATE_ACCOUNT");
}

#[tokio::test]
async fn core_error_raised_during_auth_keeps_core_mapping() {
    let err: AppError = AuthError::Core(CoreError::Validation("too short".into())).into();

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// HTTP-specific variants
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("invalid field value".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "invalid field value");
}

#[tokio::test]
async fn internal_error_variant_returns_500() {
    let (status, json) =
        error_to_response(AppError::InternalError("token signing failed".into())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], INTERNAL_MESSAGE);
}
