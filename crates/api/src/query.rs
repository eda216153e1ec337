//! Shared query parameter types for API handlers.

use repairdesk_core::types::clamp_latest_limit;
use serde::Deserialize;

/// `?limit=` for the "latest" endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct LatestParams {
    pub limit: Option<i64>,
}

impl LatestParams {
    /// The requested bound, defaulted and clamped.
    pub fn limit(&self) -> i64 {
        clamp_latest_limit(self.limit)
    }
}
