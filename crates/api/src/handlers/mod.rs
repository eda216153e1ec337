pub mod auth;
pub mod customers;
pub mod repairs;
pub mod stats;
pub mod status;
