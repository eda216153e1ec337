//! Repair entity model and DTOs.

use repairdesk_core::repair::{DeviceType, RepairStatus};
use repairdesk_core::stats::RepairSample;
use repairdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;
use validator::Validate;

/// A row from the `repairs` table.
///
/// A repair never references a user: its owner is reached through
/// `customer_id -> customers.owner_user_id`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Repair {
    pub id: DbId,
    pub customer_id: DbId,
    #[sqlx(try_from = "String")]
    pub device_type: DeviceType,
    pub brand: String,
    pub model: String,
    pub problem_description: String,
    pub estimated_cost: f64,
    #[sqlx(try_from = "String")]
    pub status: RepairStatus,
    pub repair_notes: Option<String>,
    pub completion_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Repair {
    pub fn sample(&self) -> RepairSample {
        RepairSample {
            status: self.status,
            device_type: self.device_type,
            estimated_cost: self.estimated_cost,
            created_at: self.created_at,
        }
    }
}

/// DTO for creating a repair. Enumerations are already parsed.
#[derive(Debug, Clone, Validate)]
pub struct CreateRepair {
    pub device_type: DeviceType,
    #[validate(length(min = 1, max = 100, message = "brand must be 1-100 characters"))]
    pub brand: String,
    #[validate(length(min = 1, max = 100, message = "model must be 1-100 characters"))]
    pub model: String,
    #[validate(length(
        min = 1,
        max = 2000,
        message = "problem_description must be 1-2000 characters"
    ))]
    pub problem_description: String,
    #[validate(range(min = 0.0, message = "estimated_cost must not be negative"))]
    pub estimated_cost: f64,
    /// Defaults to `pending` when absent.
    pub status: Option<RepairStatus>,
    #[validate(length(max = 2000, message = "repair_notes must be at most 2000 characters"))]
    pub repair_notes: Option<String>,
    pub completion_date: Option<Timestamp>,
}

/// DTO for updating a repair. Only present fields are applied.
#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateRepair {
    pub device_type: Option<DeviceType>,
    #[validate(length(min = 1, max = 100, message = "brand must be 1-100 characters"))]
    pub brand: Option<String>,
    #[validate(length(min = 1, max = 100, message = "model must be 1-100 characters"))]
    pub model: Option<String>,
    #[validate(length(
        min = 1,
        max = 2000,
        message = "problem_description must be 1-2000 characters"
    ))]
    pub problem_description: Option<String>,
    #[validate(range(min = 0.0, message = "estimated_cost must not be negative"))]
    pub estimated_cost: Option<f64>,
    pub status: Option<RepairStatus>,
    #[validate(length(max = 2000, message = "repair_notes must be at most 2000 characters"))]
    pub repair_notes: Option<String>,
    pub completion_date: Option<Timestamp>,
}
