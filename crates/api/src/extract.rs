//! Request body extraction that reports failures in the API error format.

use axum::extract::FromRequest;

use crate::error::AppError;

/// JSON request body extractor.
///
/// Behaves like [`axum::Json`] but rejects with [`AppError`], so a body with
/// a missing field or a wrong type comes back as a 400 `VALIDATION_ERROR`
/// instead of axum's plain-text 422.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
