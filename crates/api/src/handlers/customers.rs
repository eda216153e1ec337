//! Handlers for the `/customers` resource.
//!
//! Every handler goes through the [`OwnershipResolver`](repairdesk_db::OwnershipResolver),
//! so a customer owned by someone else answers exactly like a missing one.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use repairdesk_core::types::DbId;
use repairdesk_db::models::customer::{CreateCustomer, UpdateCustomer};

use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::query::LatestParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/customers
pub async fn list_customers(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let customers = state.resolver.list_customers(&auth.identity).await?;
    Ok(Json(DataResponse { data: customers }))
}

/// GET /api/v1/customers/latest?limit=
///
/// Most recently created customers, newest first (default 5, max 50).
pub async fn latest_customers(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<LatestParams>,
) -> AppResult<impl IntoResponse> {
    let customers = state
        .resolver
        .latest_customers(&auth.identity, params.limit())
        .await?;
    Ok(Json(DataResponse { data: customers }))
}

/// GET /api/v1/customers/{id}
pub async fn get_customer(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(customer_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let customer = state
        .resolver
        .get_customer(&auth.identity, customer_id)
        .await?;
    Ok(Json(DataResponse { data: customer }))
}

/// POST /api/v1/customers
pub async fn create_customer(
    auth: AuthUser,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateCustomer>,
) -> AppResult<impl IntoResponse> {
    let customer = state
        .resolver
        .create_customer(&auth.identity, &input)
        .await?;

    tracing::info!(
        customer_id = customer.id,
        user_id = auth.user_id(),
        "Customer created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: customer })))
}

/// PUT /api/v1/customers/{id}
pub async fn update_customer(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(customer_id): Path<DbId>,
    JsonBody(input): JsonBody<UpdateCustomer>,
) -> AppResult<impl IntoResponse> {
    let customer = state
        .resolver
        .update_customer(&auth.identity, customer_id, &input)
        .await?;

    tracing::info!(customer_id, user_id = auth.user_id(), "Customer updated");

    Ok(Json(DataResponse { data: customer }))
}

/// DELETE /api/v1/customers/{id}
///
/// Deletes the customer together with all of its repairs.
pub async fn delete_customer(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(customer_id): Path<DbId>,
) -> AppResult<StatusCode> {
    state
        .resolver
        .delete_customer(&auth.identity, customer_id)
        .await?;

    tracing::info!(customer_id, user_id = auth.user_id(), "Customer deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/customers/{id}/repairs
pub async fn list_customer_repairs(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(customer_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let repairs = state
        .resolver
        .list_repairs_for_customer(&auth.identity, customer_id)
        .await?;
    Ok(Json(DataResponse { data: repairs }))
}
