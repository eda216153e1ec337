//! Repository tests against a live PostgreSQL instance.
//!
//! Run with `DATABASE_URL` set and `--ignored`.

use assert_matches::assert_matches;
use repairdesk_core::error::CoreError;
use repairdesk_core::repair::{DeviceType, RepairStatus};
use repairdesk_db::models::customer::{CreateCustomer, UpdateCustomer};
use repairdesk_db::models::repair::{CreateRepair, UpdateRepair};
use repairdesk_db::models::user::CreateUser;
use repairdesk_db::repositories::{CustomerRepo, RepairRepo, UserRepo};
use repairdesk_db::StoreError;
use sqlx::PgPool;

async fn seed_user(pool: &PgPool, username: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@shop.test"),
            password_hash: "hash".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

fn customer(email: &str) -> CreateCustomer {
    CreateCustomer {
        name: "Grace Hopper".to_string(),
        email: email.to_string(),
        phone: "555-0199".to_string(),
        address: "1 Harbor Way".to_string(),
        last_service_date: None,
    }
}

fn repair(cost: f64) -> CreateRepair {
    CreateRepair {
        device_type: DeviceType::Smartphone,
        brand: "Apple".to_string(),
        model: "iPhone 12".to_string(),
        problem_description: "Cracked screen".to_string(),
        estimated_cost: cost,
        status: None,
        repair_notes: None,
        completion_date: None,
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_health_check(pool: PgPool) {
    repairdesk_db::health_check(&pool).await.unwrap();
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_duplicate_username_is_unique_violation(pool: PgPool) {
    seed_user(&pool, "alice").await;

    let err = UserRepo::create(
        &pool,
        &CreateUser {
            username: "alice".to_string(),
            email: "other@shop.test".to_string(),
            password_hash: "hash".to_string(),
        },
    )
    .await
    .unwrap_err();

    assert_matches!(StoreError::from(err), StoreError::UniqueViolation(c) if c == "uq_users_username");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_customer_scoped_by_owner(pool: PgPool) {
    let alice = seed_user(&pool, "alice").await;
    let bob = seed_user(&pool, "bob").await;
    let created = CustomerRepo::create(&pool, alice, &customer("g@client.test"))
        .await
        .unwrap();

    assert!(CustomerRepo::find_owned(&pool, bob, created.id)
        .await
        .unwrap()
        .is_none());
    assert!(CustomerRepo::list_owned(&pool, bob, None)
        .await
        .unwrap()
        .is_empty());

    let update = UpdateCustomer {
        name: Some("Renamed".to_string()),
        ..Default::default()
    };
    assert!(CustomerRepo::update_owned(&pool, bob, created.id, &update)
        .await
        .unwrap()
        .is_none());
    assert!(!CustomerRepo::delete_owned(&pool, bob, created.id).await.unwrap());

    let updated = CustomerRepo::update_owned(&pool, alice, created.id, &update)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.email, "g@client.test");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_customer_email_unique_across_owners(pool: PgPool) {
    let alice = seed_user(&pool, "alice").await;
    let bob = seed_user(&pool, "bob").await;
    CustomerRepo::create(&pool, alice, &customer("g@client.test"))
        .await
        .unwrap();

    let err = CustomerRepo::create(&pool, bob, &customer("g@client.test"))
        .await
        .unwrap_err();

    assert_matches!(
        CoreError::from(StoreError::from(err)),
        CoreError::Conflict(_)
    );
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_repair_scope_and_cascade(pool: PgPool) {
    let alice = seed_user(&pool, "alice").await;
    let owned = CustomerRepo::create(&pool, alice, &customer("g@client.test"))
        .await
        .unwrap();
    let created = RepairRepo::create(&pool, owned.id, &repair(120.0)).await.unwrap();
    assert_eq!(created.status, RepairStatus::Pending);

    assert!(RepairRepo::find_in(&pool, &[owned.id + 1000], created.id)
        .await
        .unwrap()
        .is_none());

    let update = UpdateRepair {
        status: Some(RepairStatus::Completed),
        ..Default::default()
    };
    let updated = RepairRepo::update_in(&pool, &[owned.id], created.id, &update)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, RepairStatus::Completed);
    assert!(updated.updated_at >= created.updated_at);

    assert!(CustomerRepo::delete_owned(&pool, alice, owned.id).await.unwrap());
    assert!(RepairRepo::list_in(&pool, &[owned.id], None)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_negative_cost_rejected_by_check_constraint(pool: PgPool) {
    let alice = seed_user(&pool, "alice").await;
    let owned = CustomerRepo::create(&pool, alice, &customer("g@client.test"))
        .await
        .unwrap();

    let err = RepairRepo::create(&pool, owned.id, &repair(-5.0)).await.unwrap_err();

    assert_matches!(StoreError::from(err), StoreError::Validation(_));
}
