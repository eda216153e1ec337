//! Handler for `/stats`.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/stats
///
/// Totals, breakdowns and 30-day activity over the caller's customers and
/// their repairs.
pub async fn get_stats(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let report = state.stats.compute(&auth.identity).await?;

    tracing::debug!(
        user_id = auth.user_id(),
        total_customers = report.total_customers,
        total_repairs = report.total_repairs,
        "Stats computed"
    );

    Ok(Json(DataResponse { data: report }))
}
