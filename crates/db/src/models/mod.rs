pub mod customer;
pub mod repair;
pub mod user;
