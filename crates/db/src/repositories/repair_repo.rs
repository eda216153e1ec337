//! Repository for the `repairs` table.
//!
//! Reads and writes filter on `customer_id = ANY($n)` with a customer-id set
//! resolved beforehand from the owner's customers.

use repairdesk_core::repair::RepairStatus;
use repairdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::repair::{CreateRepair, Repair, UpdateRepair};

const COLUMNS: &str = "id, customer_id, device_type, brand, model, problem_description, \
                       estimated_cost, status, repair_notes, completion_date, \
                       created_at, updated_at";

pub struct RepairRepo;

impl RepairRepo {
    pub async fn create(
        pool: &PgPool,
        customer_id: DbId,
        input: &CreateRepair,
    ) -> Result<Repair, sqlx::Error> {
        let query = format!(
            "INSERT INTO repairs (customer_id, device_type, brand, model, problem_description,
                                  estimated_cost, status, repair_notes, completion_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        let status = input.status.unwrap_or_default();
        sqlx::query_as::<_, Repair>(&query)
            .bind(customer_id)
            .bind(input.device_type.as_str())
            .bind(&input.brand)
            .bind(&input.model)
            .bind(&input.problem_description)
            .bind(input.estimated_cost)
            .bind(status.as_str())
            .bind(&input.repair_notes)
            .bind(input.completion_date)
            .fetch_one(pool)
            .await
    }

    pub async fn find_in(
        pool: &PgPool,
        customer_ids: &[DbId],
        id: DbId,
    ) -> Result<Option<Repair>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM repairs WHERE id = $1 AND customer_id = ANY($2)");
        sqlx::query_as::<_, Repair>(&query)
            .bind(id)
            .bind(customer_ids)
            .fetch_optional(pool)
            .await
    }

    /// List repairs of the given customers, most recently created first.
    pub async fn list_in(
        pool: &PgPool,
        customer_ids: &[DbId],
        limit: Option<i64>,
    ) -> Result<Vec<Repair>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM repairs
             WHERE customer_id = ANY($1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, Repair>(&query)
            .bind(customer_ids)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Update a repair within the customer set. Only non-`None` fields are applied.
    pub async fn update_in(
        pool: &PgPool,
        customer_ids: &[DbId],
        id: DbId,
        input: &UpdateRepair,
    ) -> Result<Option<Repair>, sqlx::Error> {
        let query = format!(
            "UPDATE repairs SET
                device_type = COALESCE($3, device_type),
                brand = COALESCE($4, brand),
                model = COALESCE($5, model),
                problem_description = COALESCE($6, problem_description),
                estimated_cost = COALESCE($7, estimated_cost),
                status = COALESCE($8, status),
                repair_notes = COALESCE($9, repair_notes),
                completion_date = COALESCE($10, completion_date),
                updated_at = NOW()
             WHERE id = $1 AND customer_id = ANY($2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Repair>(&query)
            .bind(id)
            .bind(customer_ids)
            .bind(input.device_type.map(|d| d.as_str()))
            .bind(&input.brand)
            .bind(&input.model)
            .bind(&input.problem_description)
            .bind(input.estimated_cost)
            .bind(input.status.map(RepairStatus::as_str))
            .bind(&input.repair_notes)
            .bind(input.completion_date)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete_in(
        pool: &PgPool,
        customer_ids: &[DbId],
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM repairs WHERE id = $1 AND customer_id = ANY($2)")
            .bind(id)
            .bind(customer_ids)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
