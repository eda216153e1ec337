//! Authentication primitives: session tokens, password hashing, and the
//! session authenticator built on top of them.

pub mod cookie;
pub mod jwt;
pub mod password;
pub mod session;
