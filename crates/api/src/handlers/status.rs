//! Root status probe.

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::AppState;

const SERVICE_NAME: &str = "RepairDesk API";

/// Resource groups listed by the probe.
const ENDPOINTS: [&str; 4] = [
    "/api/v1/auth",
    "/api/v1/customers",
    "/api/v1/repairs",
    "/api/v1/stats",
];

#[derive(Debug, Serialize)]
pub struct DatabaseStatus {
    /// `connected` or `connection error`.
    pub status: &'static str,
    pub checked_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub status: &'static str,
    pub current_time: DateTime<Utc>,
    pub uptime_secs: u64,
    pub environment: String,
    pub endpoints: &'static [&'static str],
    pub database: DatabaseStatus,
}

/// GET / -- service metadata plus storage reachability.
pub async fn api_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let database = match state.ping_store().await {
        Ok(()) => "connected",
        Err(e) => {
            tracing::warn!(error = %e, "Status probe could not reach the store");
            "connection error"
        }
    };
    let now = Utc::now();

    Json(StatusResponse {
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        status: "healthy",
        current_time: now,
        uptime_secs: state.started_at.elapsed().as_secs(),
        environment: state.config.app_env.clone(),
        endpoints: &ENDPOINTS,
        database: DatabaseStatus {
            status: database,
            checked_at: now,
        },
    })
}
