//! Domain primitives shared by the store and the HTTP service.
//!
//! Nothing in this crate performs I/O: it holds the error taxonomy, the
//! repair enumerations, the ownership identity types and the pure stats fold.

pub mod error;
pub mod hashing;
pub mod ownership;
pub mod repair;
pub mod stats;
pub mod types;
