//! Entity store for users, customers and repairs.
//!
//! - [`store::EntityStore`] -- the persistence contract ([`PgStore`], [`MemoryStore`]).
//! - [`ownership::OwnershipResolver`] -- scoped CRUD; the only way handlers reach records.
//! - [`stats::StatsAggregator`] -- per-user rollups through the resolver.

use sqlx::postgres::PgPoolOptions;

pub mod error;
pub mod memory;
pub mod models;
pub mod ownership;
pub mod pg_store;
pub mod repositories;
pub mod stats;
pub mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use ownership::OwnershipResolver;
pub use pg_store::PgStore;
pub use stats::StatsAggregator;
pub use store::EntityStore;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Run a trivial query to confirm the database answers.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded SQL migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
