//! Per-user rollups over the ownership subtree.
//!
//! The fold here is pure: callers hand in the customers and repairs already
//! narrowed to one owner plus the instant the report is taken at.

use std::collections::BTreeMap;

use chrono::Duration;
use serde::Serialize;

use crate::repair::{DeviceType, RepairStatus};
use crate::types::Timestamp;

/// Width of the trailing "recent activity" window, in days.
pub const RECENT_ACTIVITY_DAYS: i64 = 30;

/// The facts about one repair that feed the report.
#[derive(Debug, Clone, Copy)]
pub struct RepairSample {
    pub status: RepairStatus,
    pub device_type: DeviceType,
    pub estimated_cost: f64,
    pub created_at: Timestamp,
}

/// Records created inside the trailing window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecentActivity {
    pub new_customers: i64,
    pub new_repairs: i64,
}

/// Aggregate metrics for one user.
///
/// Breakdowns only carry keys that occur in the data; absent values are
/// omitted rather than zero-filled.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatsReport {
    pub total_customers: i64,
    pub total_repairs: i64,
    pub total_income: f64,
    pub repair_status_breakdown: BTreeMap<String, i64>,
    pub repair_device_type_breakdown: BTreeMap<String, i64>,
    pub recent_activity: RecentActivity,
}

/// Start of the recent-activity window: `now - 30 days`, inclusive.
pub fn recent_window_start(now: Timestamp) -> Timestamp {
    now - Duration::days(RECENT_ACTIVITY_DAYS)
}

impl StatsReport {
    /// Fold customers (by creation time) and repairs into a report taken at `now`.
    pub fn from_samples<C, R>(customer_created_at: C, repairs: R, now: Timestamp) -> Self
    where
        C: IntoIterator<Item = Timestamp>,
        R: IntoIterator<Item = RepairSample>,
    {
        let window_start = recent_window_start(now);
        let mut report = Self::default();

        for created_at in customer_created_at {
            report.total_customers += 1;
            if created_at >= window_start {
                report.recent_activity.new_customers += 1;
            }
        }

        for repair in repairs {
            report.total_repairs += 1;
            report.total_income += repair.estimated_cost;
            *report
                .repair_status_breakdown
                .entry(repair.status.as_str().to_string())
                .or_insert(0) += 1;
            *report
                .repair_device_type_breakdown
                .entry(repair.device_type.as_str().to_string())
                .or_insert(0) += 1;
            if repair.created_at >= window_start {
                report.recent_activity.new_repairs += 1;
            }
        }

        report
    }
}
