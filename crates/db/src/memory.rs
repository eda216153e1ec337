//! In-process [`EntityStore`] used for tests and for running without PostgreSQL.
//!
//! Mirrors the schema's guarantees: unique usernames/emails, the cost check,
//! referential integrity and cascade on customer delete. Each operation
//! holds the table lock for its whole duration, so each one is atomic;
//! sequences of operations are not.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use repairdesk_core::ownership::{OwnerScope, RepairScope};
use repairdesk_core::repair::validate_estimated_cost;
use repairdesk_core::types::{DbId, Timestamp};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::customer::{CreateCustomer, Customer, UpdateCustomer};
use crate::models::repair::{CreateRepair, Repair, UpdateRepair};
use crate::models::user::{CreateUser, User};
use crate::store::EntityStore;

#[derive(Default)]
struct Tables {
    next_id: DbId,
    users: BTreeMap<DbId, User>,
    customers: BTreeMap<DbId, Customer>,
    repairs: BTreeMap<DbId, Repair>,
}

impl Tables {
    fn allocate_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }

    fn customer_email_taken(&self, email: &str, except: Option<DbId>) -> bool {
        self.customers
            .values()
            .any(|c| c.email == email && Some(c.id) != except)
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_cost(cost: f64) -> Result<(), StoreError> {
    validate_estimated_cost(cost).map_err(|e| StoreError::Validation(e.to_string()))
}

/// Newest first, ties broken by id so the order is stable.
fn newest_first<T, F>(rows: &mut [T], key: F)
where
    F: Fn(&T) -> (Timestamp, DbId),
{
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
}

fn apply_limit<T>(mut rows: Vec<T>, limit: Option<i64>) -> Vec<T> {
    if let Some(limit) = limit {
        rows.truncate(usize::try_from(limit.max(0)).unwrap_or(usize::MAX));
    }
    rows
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn insert_user(&self, input: &CreateUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == input.username) {
            return Err(StoreError::UniqueViolation("uq_users_username".into()));
        }
        if tables.users.values().any(|u| u.email == input.email) {
            return Err(StoreError::UniqueViolation("uq_users_email".into()));
        }
        let user = User {
            id: tables.allocate_id(),
            username: input.username.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: DbId) -> Result<Option<User>, StoreError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn update_user_password(
        &self,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        match tables.users.get_mut(&id) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn insert_customer(
        &self,
        owner: &OwnerScope,
        input: &CreateCustomer,
    ) -> Result<Customer, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&owner.owner_user_id()) {
            return Err(StoreError::Validation(
                "customer owner does not exist".to_string(),
            ));
        }
        if tables.customer_email_taken(&input.email, None) {
            return Err(StoreError::UniqueViolation("uq_customers_email".into()));
        }
        let now = Utc::now();
        let customer = Customer {
            id: tables.allocate_id(),
            owner_user_id: owner.owner_user_id(),
            name: input.name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            address: input.address.clone(),
            last_service_date: input.last_service_date.unwrap_or(now),
            created_at: now,
        };
        tables.customers.insert(customer.id, customer.clone());
        Ok(customer)
    }

    async fn find_customer(
        &self,
        scope: &OwnerScope,
        id: DbId,
    ) -> Result<Option<Customer>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .customers
            .get(&id)
            .filter(|c| scope.admits(c.owner_user_id))
            .cloned())
    }

    async fn list_customers(
        &self,
        scope: &OwnerScope,
        limit: Option<i64>,
    ) -> Result<Vec<Customer>, StoreError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Customer> = tables
            .customers
            .values()
            .filter(|c| scope.admits(c.owner_user_id))
            .cloned()
            .collect();
        newest_first(&mut rows, |c| (c.created_at, c.id));
        Ok(apply_limit(rows, limit))
    }

    async fn customer_keys(&self, scope: &OwnerScope) -> Result<Vec<(DbId, DbId)>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .customers
            .values()
            .filter(|c| scope.admits(c.owner_user_id))
            .map(|c| (c.id, c.owner_user_id))
            .collect())
    }

    async fn update_customer(
        &self,
        scope: &OwnerScope,
        id: DbId,
        input: &UpdateCustomer,
    ) -> Result<Option<Customer>, StoreError> {
        let mut tables = self.tables.write().await;
        let in_scope = tables
            .customers
            .get(&id)
            .is_some_and(|c| scope.admits(c.owner_user_id));
        if !in_scope {
            return Ok(None);
        }
        if let Some(email) = &input.email {
            if tables.customer_email_taken(email, Some(id)) {
                return Err(StoreError::UniqueViolation("uq_customers_email".into()));
            }
        }
        let Some(customer) = tables.customers.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &input.name {
            customer.name = name.clone();
        }
        if let Some(email) = &input.email {
            customer.email = email.clone();
        }
        if let Some(phone) = &input.phone {
            customer.phone = phone.clone();
        }
        if let Some(address) = &input.address {
            customer.address = address.clone();
        }
        if let Some(date) = input.last_service_date {
            customer.last_service_date = date;
        }
        Ok(Some(customer.clone()))
    }

    async fn delete_customer(&self, scope: &OwnerScope, id: DbId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let in_scope = tables
            .customers
            .get(&id)
            .is_some_and(|c| scope.admits(c.owner_user_id));
        if !in_scope {
            return Ok(false);
        }
        tables.customers.remove(&id);
        tables.repairs.retain(|_, r| r.customer_id != id);
        Ok(true)
    }

    async fn insert_repair(
        &self,
        customer_id: DbId,
        input: &CreateRepair,
    ) -> Result<Repair, StoreError> {
        check_cost(input.estimated_cost)?;
        let mut tables = self.tables.write().await;
        if !tables.customers.contains_key(&customer_id) {
            return Err(StoreError::Validation(
                "repair customer does not exist".to_string(),
            ));
        }
        let now = Utc::now();
        let repair = Repair {
            id: tables.allocate_id(),
            customer_id,
            device_type: input.device_type,
            brand: input.brand.clone(),
            model: input.model.clone(),
            problem_description: input.problem_description.clone(),
            estimated_cost: input.estimated_cost,
            status: input.status.unwrap_or_default(),
            repair_notes: input.repair_notes.clone(),
            completion_date: input.completion_date,
            created_at: now,
            updated_at: now,
        };
        tables.repairs.insert(repair.id, repair.clone());
        Ok(repair)
    }

    async fn find_repair(
        &self,
        scope: &RepairScope,
        id: DbId,
    ) -> Result<Option<Repair>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .repairs
            .get(&id)
            .filter(|r| scope.admits(r.customer_id))
            .cloned())
    }

    async fn list_repairs(
        &self,
        scope: &RepairScope,
        limit: Option<i64>,
    ) -> Result<Vec<Repair>, StoreError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Repair> = tables
            .repairs
            .values()
            .filter(|r| scope.admits(r.customer_id))
            .cloned()
            .collect();
        newest_first(&mut rows, |r| (r.created_at, r.id));
        Ok(apply_limit(rows, limit))
    }

    async fn update_repair(
        &self,
        scope: &RepairScope,
        id: DbId,
        input: &UpdateRepair,
    ) -> Result<Option<Repair>, StoreError> {
        if let Some(cost) = input.estimated_cost {
            check_cost(cost)?;
        }
        let mut tables = self.tables.write().await;
        let Some(repair) = tables
            .repairs
            .get_mut(&id)
            .filter(|r| scope.admits(r.customer_id))
        else {
            return Ok(None);
        };
        if let Some(device_type) = input.device_type {
            repair.device_type = device_type;
        }
        if let Some(brand) = &input.brand {
            repair.brand = brand.clone();
        }
        if let Some(model) = &input.model {
            repair.model = model.clone();
        }
        if let Some(description) = &input.problem_description {
            repair.problem_description = description.clone();
        }
        if let Some(cost) = input.estimated_cost {
            repair.estimated_cost = cost;
        }
        if let Some(status) = input.status {
            repair.status = status;
        }
        if let Some(notes) = &input.repair_notes {
            repair.repair_notes = Some(notes.clone());
        }
        if let Some(date) = input.completion_date {
            repair.completion_date = Some(date);
        }
        repair.updated_at = Utc::now();
        Ok(Some(repair.clone()))
    }

    async fn delete_repair(&self, scope: &RepairScope, id: DbId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let in_scope = tables
            .repairs
            .get(&id)
            .is_some_and(|r| scope.admits(r.customer_id));
        if in_scope {
            tables.repairs.remove(&id);
        }
        Ok(in_scope)
    }
}
