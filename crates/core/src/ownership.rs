//! Ownership chain primitives: User -> Customer -> Repair.
//!
//! Every store operation on a customer takes an [`OwnerScope`] and every
//! store operation on a repair takes a [`RepairScope`]. Both can only be
//! obtained from an authenticated [`UserIdentity`], so no query path exists
//! that is not narrowed to the caller's subtree.

use serde::Serialize;

use crate::types::DbId;

/// The resolved identity of an authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserIdentity {
    pub id: DbId,
    pub username: String,
    pub email: String,
}

/// Filter restricting customer queries to one owner.
///
/// Stores translate this into `owner_user_id = <id>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerScope {
    owner_user_id: DbId,
}

impl OwnerScope {
    pub fn owner_user_id(&self) -> DbId {
        self.owner_user_id
    }

    /// Whether a customer owned by `owner_user_id` falls inside this scope.
    pub fn admits(&self, owner_user_id: DbId) -> bool {
        self.owner_user_id == owner_user_id
    }
}

/// Build the customer filter for an authenticated caller.
pub fn scope_to(user: &UserIdentity) -> OwnerScope {
    OwnerScope {
        owner_user_id: user.id,
    }
}

/// Filter restricting repair queries to a set of customer ids.
///
/// Repairs never reference a user directly, so this set is always computed
/// from an [`OwnerScope`] first (customer ids, then repairs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairScope {
    customer_ids: Vec<DbId>,
}

impl RepairScope {
    /// Scope over the customers that `owner` admits.
    ///
    /// `customers` yields `(customer_id, owner_user_id)` pairs. Pairs owned by
    /// anyone else are dropped, so a scope never reaches past its owner.
    pub fn within(
        owner: &OwnerScope,
        customers: impl IntoIterator<Item = (DbId, DbId)>,
    ) -> Self {
        let mut customer_ids: Vec<DbId> = customers
            .into_iter()
            .filter(|&(_, owner_user_id)| owner.admits(owner_user_id))
            .map(|(id, _)| id)
            .collect();
        customer_ids.sort_unstable();
        customer_ids.dedup();
        Self { customer_ids }
    }

    pub fn customer_ids(&self) -> &[DbId] {
        &self.customer_ids
    }

    pub fn is_empty(&self) -> bool {
        self.customer_ids.is_empty()
    }

    /// Whether a repair filed against `customer_id` falls inside this scope.
    pub fn admits(&self, customer_id: DbId) -> bool {
        self.customer_ids.binary_search(&customer_id).is_ok()
    }
}
