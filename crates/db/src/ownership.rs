//! Ownership-scoped data access.
//!
//! [`OwnershipResolver`] is the only path from handlers to customer and
//! repair records. Every method takes the caller's [`UserIdentity`], derives
//! the filter with [`scope_to`], and reports records outside the caller's
//! subtree exactly like records that do not exist.

use std::sync::Arc;

use repairdesk_core::error::CoreError;
use repairdesk_core::ownership::{scope_to, RepairScope, UserIdentity};
use repairdesk_core::types::DbId;
use validator::Validate;

use crate::models::customer::{CreateCustomer, Customer, UpdateCustomer};
use crate::models::repair::{CreateRepair, Repair, UpdateRepair};
use crate::error::StoreError;
use crate::store::EntityStore;

const CUSTOMER: &str = "Customer";
const REPAIR: &str = "Repair";

/// Run the DTO's field validators, turning failures into [`CoreError::Validation`].
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string().replace('\n', "; ")))
}

fn not_found(entity: &'static str, id: DbId) -> CoreError {
    CoreError::NotFound { entity, id }
}

/// The only unique column on customers is the email.
fn customer_conflict(err: StoreError) -> CoreError {
    match CoreError::from(err) {
        CoreError::Conflict(_) => CoreError::Conflict("Customer already registered".to_string()),
        other => other,
    }
}

/// Scoped CRUD over customers and repairs. Cheap to clone.
#[derive(Clone)]
pub struct OwnershipResolver {
    store: Arc<dyn EntityStore>,
}

impl OwnershipResolver {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    // -----------------------------------------------------------------------
    // Customers
    // -----------------------------------------------------------------------

    /// All of the caller's customers, newest first.
    pub async fn list_customers(&self, user: &UserIdentity) -> Result<Vec<Customer>, CoreError> {
        Ok(self.store.list_customers(&scope_to(user), None).await?)
    }

    /// The caller's `limit` most recently created customers.
    pub async fn latest_customers(
        &self,
        user: &UserIdentity,
        limit: i64,
    ) -> Result<Vec<Customer>, CoreError> {
        Ok(self
            .store
            .list_customers(&scope_to(user), Some(limit))
            .await?)
    }

    pub async fn get_customer(
        &self,
        user: &UserIdentity,
        customer_id: DbId,
    ) -> Result<Customer, CoreError> {
        self.store
            .find_customer(&scope_to(user), customer_id)
            .await?
            .ok_or_else(|| not_found(CUSTOMER, customer_id))
    }

    /// Create a customer owned by the caller.
    ///
    /// Customer emails are unique across all owners; a clash is a `Conflict`.
    pub async fn create_customer(
        &self,
        user: &UserIdentity,
        input: &CreateCustomer,
    ) -> Result<Customer, CoreError> {
        validate_input(input)?;
        self.store
            .insert_customer(&scope_to(user), input)
            .await
            .map_err(customer_conflict)
    }

    pub async fn update_customer(
        &self,
        user: &UserIdentity,
        customer_id: DbId,
        input: &UpdateCustomer,
    ) -> Result<Customer, CoreError> {
        validate_input(input)?;
        self.store
            .update_customer(&scope_to(user), customer_id, input)
            .await
            .map_err(customer_conflict)?
            .ok_or_else(|| not_found(CUSTOMER, customer_id))
    }

    /// Delete a customer and, with it, all of its repairs.
    pub async fn delete_customer(
        &self,
        user: &UserIdentity,
        customer_id: DbId,
    ) -> Result<(), CoreError> {
        if self
            .store
            .delete_customer(&scope_to(user), customer_id)
            .await?
        {
            Ok(())
        } else {
            Err(not_found(CUSTOMER, customer_id))
        }
    }

    // -----------------------------------------------------------------------
    // Repairs
    // -----------------------------------------------------------------------

    /// Stage one of every repair access: the caller's customer ids.
    pub async fn repair_scope(&self, user: &UserIdentity) -> Result<RepairScope, CoreError> {
        let owner = scope_to(user);
        let keys = self.store.customer_keys(&owner).await?;
        Ok(RepairScope::within(&owner, keys))
    }

    /// Repairs inside a scope already derived from the caller's customers.
    pub(crate) async fn repairs_in(&self, scope: &RepairScope) -> Result<Vec<Repair>, CoreError> {
        Ok(self.store.list_repairs(scope, None).await?)
    }

    /// Repairs of one customer: the customer is resolved in scope first.
    pub async fn list_repairs_for_customer(
        &self,
        user: &UserIdentity,
        customer_id: DbId,
    ) -> Result<Vec<Repair>, CoreError> {
        let customer = self.get_customer(user, customer_id).await?;
        let scope = RepairScope::within(&scope_to(user), [(customer.id, customer.owner_user_id)]);
        Ok(self.store.list_repairs(&scope, None).await?)
    }

    /// All repairs across the caller's customers, newest first.
    pub async fn list_repairs(&self, user: &UserIdentity) -> Result<Vec<Repair>, CoreError> {
        let scope = self.repair_scope(user).await?;
        Ok(self.store.list_repairs(&scope, None).await?)
    }

    pub async fn latest_repairs(
        &self,
        user: &UserIdentity,
        limit: i64,
    ) -> Result<Vec<Repair>, CoreError> {
        let scope = self.repair_scope(user).await?;
        Ok(self.store.list_repairs(&scope, Some(limit)).await?)
    }

    pub async fn get_repair(
        &self,
        user: &UserIdentity,
        repair_id: DbId,
    ) -> Result<Repair, CoreError> {
        let scope = self.repair_scope(user).await?;
        self.store
            .find_repair(&scope, repair_id)
            .await?
            .ok_or_else(|| not_found(REPAIR, repair_id))
    }

    /// File a repair against one of the caller's customers.
    ///
    /// Nothing is written when the customer is absent or owned by someone else.
    pub async fn create_repair(
        &self,
        user: &UserIdentity,
        customer_id: DbId,
        input: &CreateRepair,
    ) -> Result<Repair, CoreError> {
        validate_input(input)?;
        let customer = self.get_customer(user, customer_id).await?;
        Ok(self.store.insert_repair(customer.id, input).await?)
    }

    /// Update a repair. Any status may follow any other.
    pub async fn update_repair(
        &self,
        user: &UserIdentity,
        repair_id: DbId,
        input: &UpdateRepair,
    ) -> Result<Repair, CoreError> {
        validate_input(input)?;
        let scope = self.repair_scope(user).await?;
        self.store
            .update_repair(&scope, repair_id, input)
            .await?
            .ok_or_else(|| not_found(REPAIR, repair_id))
    }

    pub async fn delete_repair(
        &self,
        user: &UserIdentity,
        repair_id: DbId,
    ) -> Result<(), CoreError> {
        let scope = self.repair_scope(user).await?;
        if self.store.delete_repair(&scope, repair_id).await? {
            Ok(())
        } else {
            Err(not_found(REPAIR, repair_id))
        }
    }
}
