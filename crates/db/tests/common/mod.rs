#![allow(dead_code)]

use std::sync::Arc;

use repairdesk_core::ownership::UserIdentity;
use repairdesk_core::repair::{DeviceType, RepairStatus};
use repairdesk_db::models::customer::{CreateCustomer, Customer};
use repairdesk_db::models::repair::{CreateRepair, Repair};
use repairdesk_db::models::user::CreateUser;
use repairdesk_db::{EntityStore, MemoryStore, OwnershipResolver};

/// A fresh in-memory store plus a resolver over it.
pub fn setup() -> (Arc<dyn EntityStore>, OwnershipResolver) {
    let store: Arc<dyn EntityStore> = Arc::new(MemoryStore::new());
    let resolver = OwnershipResolver::new(Arc::clone(&store));
    (store, resolver)
}

/// Insert a user directly and return its identity.
pub async fn create_user(store: &Arc<dyn EntityStore>, username: &str) -> UserIdentity {
    let user = store
        .insert_user(&CreateUser {
            username: username.to_string(),
            email: format!("{username}@shop.test"),
            password_hash: "not-a-real-hash".to_string(),
        })
        .await
        .expect("user insert should succeed");
    user.identity()
}

pub fn customer_input(email: &str) -> CreateCustomer {
    CreateCustomer {
        name: "Ada Lovelace".to_string(),
        email: email.to_string(),
        phone: "+44 20 7946 0000".to_string(),
        address: "12 Analytical Row, London".to_string(),
        last_service_date: None,
    }
}

pub fn repair_input(cost: f64, status: Option<RepairStatus>) -> CreateRepair {
    CreateRepair {
        device_type: DeviceType::Laptop,
        brand: "Lenovo".to_string(),
        model: "X1 Carbon".to_string(),
        problem_description: "Keyboard unresponsive".to_string(),
        estimated_cost: cost,
        status,
        repair_notes: None,
        completion_date: None,
    }
}

pub async fn create_customer(
    resolver: &OwnershipResolver,
    user: &UserIdentity,
    email: &str,
) -> Customer {
    resolver
        .create_customer(user, &customer_input(email))
        .await
        .expect("customer creation should succeed")
}

pub async fn create_repair(
    resolver: &OwnershipResolver,
    user: &UserIdentity,
    customer: &Customer,
    cost: f64,
    status: RepairStatus,
) -> Repair {
    resolver
        .create_repair(user, customer.id, &repair_input(cost, Some(status)))
        .await
        .expect("repair creation should succeed")
}
