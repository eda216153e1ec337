//! PostgreSQL repositories, one per table.

pub mod customer_repo;
pub mod repair_repo;
pub mod user_repo;

pub use customer_repo::CustomerRepo;
pub use repair_repo::RepairRepo;
pub use user_repo::UserRepo;
