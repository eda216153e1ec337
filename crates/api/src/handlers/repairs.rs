//! Handlers for the `/repairs` resource.
//!
//! Request bodies carry the enumerations as strings; they are parsed here so
//! an unknown status or device type is a `VALIDATION_ERROR` naming the
//! allowed values rather than a generic body rejection.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use repairdesk_core::error::CoreError;
use repairdesk_core::repair::{DeviceType, RepairStatus};
use repairdesk_core::types::{DbId, Timestamp};
use repairdesk_db::models::repair::{CreateRepair, UpdateRepair};
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::query::LatestParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /repairs`.
#[derive(Debug, Deserialize)]
pub struct CreateRepairRequest {
    pub customer_id: DbId,
    pub device_type: String,
    pub brand: String,
    pub model: String,
    pub problem_description: String,
    pub estimated_cost: f64,
    pub status: Option<String>,
    pub repair_notes: Option<String>,
    pub completion_date: Option<Timestamp>,
}

impl CreateRepairRequest {
    fn into_parts(self) -> Result<(DbId, CreateRepair), CoreError> {
        let input = CreateRepair {
            device_type: self.device_type.parse::<DeviceType>()?,
            brand: self.brand,
            model: self.model,
            problem_description: self.problem_description,
            estimated_cost: self.estimated_cost,
            status: self
                .status
                .map(|s| s.parse::<RepairStatus>())
                .transpose()?,
            repair_notes: self.repair_notes,
            completion_date: self.completion_date,
        };
        Ok((self.customer_id, input))
    }
}

/// Request body for `PUT /repairs/{id}`. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateRepairRequest {
    pub device_type: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub problem_description: Option<String>,
    pub estimated_cost: Option<f64>,
    pub status: Option<String>,
    pub repair_notes: Option<String>,
    pub completion_date: Option<Timestamp>,
}

impl TryFrom<UpdateRepairRequest> for UpdateRepair {
    type Error = CoreError;

    fn try_from(req: UpdateRepairRequest) -> Result<Self, Self::Error> {
        Ok(UpdateRepair {
            device_type: req
                .device_type
                .map(|s| s.parse::<DeviceType>())
                .transpose()?,
            brand: req.brand,
            model: req.model,
            problem_description: req.problem_description,
            estimated_cost: req.estimated_cost,
            status: req.status.map(|s| s.parse::<RepairStatus>()).transpose()?,
            repair_notes: req.repair_notes,
            completion_date: req.completion_date,
        })
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/repairs
///
/// Repairs across all of the caller's customers, newest first.
pub async fn list_repairs(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let repairs = state.resolver.list_repairs(&auth.identity).await?;
    Ok(Json(DataResponse { data: repairs }))
}

/// GET /api/v1/repairs/latest?limit=
pub async fn latest_repairs(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<LatestParams>,
) -> AppResult<impl IntoResponse> {
    let repairs = state
        .resolver
        .latest_repairs(&auth.identity, params.limit())
        .await?;
    Ok(Json(DataResponse { data: repairs }))
}

/// GET /api/v1/repairs/{id}
pub async fn get_repair(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(repair_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let repair = state.resolver.get_repair(&auth.identity, repair_id).await?;
    Ok(Json(DataResponse { data: repair }))
}

/// POST /api/v1/repairs
///
/// File a repair against one of the caller's customers.
pub async fn create_repair(
    auth: AuthUser,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateRepairRequest>,
) -> AppResult<impl IntoResponse> {
    let (customer_id, input) = body.into_parts()?;
    let repair = state
        .resolver
        .create_repair(&auth.identity, customer_id, &input)
        .await?;

    tracing::info!(
        repair_id = repair.id,
        customer_id,
        user_id = auth.user_id(),
        "Repair created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: repair })))
}

/// PUT /api/v1/repairs/{id}
pub async fn update_repair(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(repair_id): Path<DbId>,
    JsonBody(body): JsonBody<UpdateRepairRequest>,
) -> AppResult<impl IntoResponse> {
    let input = UpdateRepair::try_from(body)?;
    let repair = state
        .resolver
        .update_repair(&auth.identity, repair_id, &input)
        .await?;

    tracing::info!(
        repair_id,
        status = repair.status.as_str(),
        user_id = auth.user_id(),
        "Repair updated"
    );

    Ok(Json(DataResponse { data: repair }))
}

/// DELETE /api/v1/repairs/{id}
pub async fn delete_repair(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(repair_id): Path<DbId>,
) -> AppResult<StatusCode> {
    state
        .resolver
        .delete_repair(&auth.identity, repair_id)
        .await?;

    tracing::info!(repair_id, user_id = auth.user_id(), "Repair deleted");

    Ok(StatusCode::NO_CONTENT)
}
