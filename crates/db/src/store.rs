//! The persistence contract the ownership layer sits on.
//!
//! Customer operations take an [`OwnerScope`]; repair lookups take a
//! [`RepairScope`]. The trait only needs equality and set-membership
//! filters, so it is implementable without joins or transactions.

use async_trait::async_trait;
use repairdesk_core::ownership::{OwnerScope, RepairScope};
use repairdesk_core::types::DbId;

use crate::error::StoreError;
use crate::models::customer::{CreateCustomer, Customer, UpdateCustomer};
use crate::models::repair::{CreateRepair, Repair, UpdateRepair};
use crate::models::user::{CreateUser, User};

#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;

    // --- users ---

    async fn insert_user(&self, input: &CreateUser) -> Result<User, StoreError>;

    async fn find_user_by_id(&self, id: DbId) -> Result<Option<User>, StoreError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Replace a user's password hash. Returns `false` if the user is gone.
    async fn update_user_password(&self, id: DbId, password_hash: &str)
        -> Result<bool, StoreError>;

    // --- customers ---

    /// Insert a customer owned by the scope's user.
    async fn insert_customer(
        &self,
        owner: &OwnerScope,
        input: &CreateCustomer,
    ) -> Result<Customer, StoreError>;

    async fn find_customer(
        &self,
        scope: &OwnerScope,
        id: DbId,
    ) -> Result<Option<Customer>, StoreError>;

    /// Customers in scope, newest first, optionally bounded.
    async fn list_customers(
        &self,
        scope: &OwnerScope,
        limit: Option<i64>,
    ) -> Result<Vec<Customer>, StoreError>;

    /// `(id, owner_user_id)` of every customer in scope.
    async fn customer_keys(&self, scope: &OwnerScope) -> Result<Vec<(DbId, DbId)>, StoreError>;

    async fn update_customer(
        &self,
        scope: &OwnerScope,
        id: DbId,
        input: &UpdateCustomer,
    ) -> Result<Option<Customer>, StoreError>;

    /// Delete a customer in scope together with its repairs.
    async fn delete_customer(&self, scope: &OwnerScope, id: DbId) -> Result<bool, StoreError>;

    // --- repairs ---

    /// Insert a repair for a customer the caller has already resolved in scope.
    async fn insert_repair(
        &self,
        customer_id: DbId,
        input: &CreateRepair,
    ) -> Result<Repair, StoreError>;

    async fn find_repair(
        &self,
        scope: &RepairScope,
        id: DbId,
    ) -> Result<Option<Repair>, StoreError>;

    /// Repairs in scope, newest first, optionally bounded.
    async fn list_repairs(
        &self,
        scope: &RepairScope,
        limit: Option<i64>,
    ) -> Result<Vec<Repair>, StoreError>;

    async fn update_repair(
        &self,
        scope: &RepairScope,
        id: DbId,
        input: &UpdateRepair,
    ) -> Result<Option<Repair>, StoreError>;

    async fn delete_repair(&self, scope: &RepairScope, id: DbId) -> Result<bool, StoreError>;
}
