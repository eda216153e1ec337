//! Customer entity model and DTOs.

use repairdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `customers` table.
///
/// `owner_user_id` is fixed at creation; no update path touches it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Customer {
    pub id: DbId,
    pub owner_user_id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub last_service_date: Timestamp,
    pub created_at: Timestamp,
}

/// DTO for creating a customer. The owner comes from the caller's scope.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCustomer {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, max = 50, message = "phone must be 1-50 characters"))]
    pub phone: String,
    #[validate(length(min = 1, max = 500, message = "address must be 1-500 characters"))]
    pub address: String,
    /// Defaults to the creation time when absent.
    pub last_service_date: Option<Timestamp>,
}

/// DTO for updating a customer. Only present fields are applied.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCustomer {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 50, message = "phone must be 1-50 characters"))]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 500, message = "address must be 1-500 characters"))]
    pub address: Option<String>,
    pub last_service_date: Option<Timestamp>,
}
