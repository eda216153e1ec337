//! [`EntityStore`] backed by PostgreSQL through the repositories.

use async_trait::async_trait;
use repairdesk_core::ownership::{OwnerScope, RepairScope};
use repairdesk_core::types::DbId;

use crate::error::StoreError;
use crate::models::customer::{CreateCustomer, Customer, UpdateCustomer};
use crate::models::repair::{CreateRepair, Repair, UpdateRepair};
use crate::models::user::{CreateUser, User};
use crate::repositories::{CustomerRepo, RepairRepo, UserRepo};
use crate::store::EntityStore;
use crate::DbPool;

/// PostgreSQL entity store. Cheap to clone; the pool is shared.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl EntityStore for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    async fn insert_user(&self, input: &CreateUser) -> Result<User, StoreError> {
        Ok(UserRepo::create(&self.pool, input).await?)
    }

    async fn find_user_by_id(&self, id: DbId) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_username(&self.pool, username).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_email(&self.pool, email).await?)
    }

    async fn update_user_password(
        &self,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, StoreError> {
        Ok(UserRepo::update_password(&self.pool, id, password_hash).await?)
    }

    async fn insert_customer(
        &self,
        owner: &OwnerScope,
        input: &CreateCustomer,
    ) -> Result<Customer, StoreError> {
        Ok(CustomerRepo::create(&self.pool, owner.owner_user_id(), input).await?)
    }

    async fn find_customer(
        &self,
        scope: &OwnerScope,
        id: DbId,
    ) -> Result<Option<Customer>, StoreError> {
        Ok(CustomerRepo::find_owned(&self.pool, scope.owner_user_id(), id).await?)
    }

    async fn list_customers(
        &self,
        scope: &OwnerScope,
        limit: Option<i64>,
    ) -> Result<Vec<Customer>, StoreError> {
        Ok(CustomerRepo::list_owned(&self.pool, scope.owner_user_id(), limit).await?)
    }

    async fn customer_keys(&self, scope: &OwnerScope) -> Result<Vec<(DbId, DbId)>, StoreError> {
        Ok(CustomerRepo::keys_owned(&self.pool, scope.owner_user_id()).await?)
    }

    async fn update_customer(
        &self,
        scope: &OwnerScope,
        id: DbId,
        input: &UpdateCustomer,
    ) -> Result<Option<Customer>, StoreError> {
        Ok(CustomerRepo::update_owned(&self.pool, scope.owner_user_id(), id, input).await?)
    }

    async fn delete_customer(&self, scope: &OwnerScope, id: DbId) -> Result<bool, StoreError> {
        Ok(CustomerRepo::delete_owned(&self.pool, scope.owner_user_id(), id).await?)
    }

    async fn insert_repair(
        &self,
        customer_id: DbId,
        input: &CreateRepair,
    ) -> Result<Repair, StoreError> {
        Ok(RepairRepo::create(&self.pool, customer_id, input).await?)
    }

    async fn find_repair(
        &self,
        scope: &RepairScope,
        id: DbId,
    ) -> Result<Option<Repair>, StoreError> {
        if scope.is_empty() {
            return Ok(None);
        }
        Ok(RepairRepo::find_in(&self.pool, scope.customer_ids(), id).await?)
    }

    async fn list_repairs(
        &self,
        scope: &RepairScope,
        limit: Option<i64>,
    ) -> Result<Vec<Repair>, StoreError> {
        if scope.is_empty() {
            return Ok(Vec::new());
        }
        Ok(RepairRepo::list_in(&self.pool, scope.customer_ids(), limit).await?)
    }

    async fn update_repair(
        &self,
        scope: &RepairScope,
        id: DbId,
        input: &UpdateRepair,
    ) -> Result<Option<Repair>, StoreError> {
        if scope.is_empty() {
            return Ok(None);
        }
        Ok(RepairRepo::update_in(&self.pool, scope.customer_ids(), id, input).await?)
    }

    async fn delete_repair(&self, scope: &RepairScope, id: DbId) -> Result<bool, StoreError> {
        if scope.is_empty() {
            return Ok(false);
        }
        Ok(RepairRepo::delete_in(&self.pool, scope.customer_ids(), id).await?)
    }
}
