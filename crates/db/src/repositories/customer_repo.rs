//! Repository for the `customers` table.
//!
//! Every query carries `owner_user_id = $n`; there is no unscoped read.

use repairdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::customer::{CreateCustomer, Customer, UpdateCustomer};

const COLUMNS: &str = "id, owner_user_id, name, email, phone, address, \
                       last_service_date, created_at";

pub struct CustomerRepo;

impl CustomerRepo {
    /// Insert a customer for `owner_user_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        owner_user_id: DbId,
        input: &CreateCustomer,
    ) -> Result<Customer, sqlx::Error> {
        let query = format!(
            "INSERT INTO customers (owner_user_id, name, email, phone, address, last_service_date)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, NOW()))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(owner_user_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.address)
            .bind(input.last_service_date)
            .fetch_one(pool)
            .await
    }

    pub async fn find_owned(
        pool: &PgPool,
        owner_user_id: DbId,
        id: DbId,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM customers WHERE id = $1 AND owner_user_id = $2");
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .bind(owner_user_id)
            .fetch_optional(pool)
            .await
    }

    /// List an owner's customers, most recently created first.
    pub async fn list_owned(
        pool: &PgPool,
        owner_user_id: DbId,
        limit: Option<i64>,
    ) -> Result<Vec<Customer>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM customers
             WHERE owner_user_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2"
        );
        // `LIMIT NULL` means no limit in PostgreSQL.
        sqlx::query_as::<_, Customer>(&query)
            .bind(owner_user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn keys_owned(
        pool: &PgPool,
        owner_user_id: DbId,
    ) -> Result<Vec<(DbId, DbId)>, sqlx::Error> {
        sqlx::query_as::<_, (DbId, DbId)>(
            "SELECT id, owner_user_id FROM customers WHERE owner_user_id = $1",
        )
        .bind(owner_user_id)
        .fetch_all(pool)
        .await
    }

    /// Update an owned customer. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists for this owner.
    pub async fn update_owned(
        pool: &PgPool,
        owner_user_id: DbId,
        id: DbId,
        input: &UpdateCustomer,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!(
            "UPDATE customers SET
                name = COALESCE($3, name),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                address = COALESCE($6, address),
                last_service_date = COALESCE($7, last_service_date)
             WHERE id = $1 AND owner_user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .bind(owner_user_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.address)
            .bind(input.last_service_date)
            .fetch_optional(pool)
            .await
    }

    /// Delete an owned customer; its repairs go with it (`ON DELETE CASCADE`).
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete_owned(
        pool: &PgPool,
        owner_user_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1 AND owner_user_id = $2")
            .bind(id)
            .bind(owner_user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
