//! Password hashing as a capability.
//!
//! The authenticator only sees this trait; the concrete one-way function
//! (Argon2id in the API crate) can be swapped without touching it.

use crate::error::CoreError;

/// One-way, salted password hashing with verification.
pub trait CredentialHasher: Send + Sync {
    /// Hash `plaintext` with a fresh random salt.
    fn hash(&self, plaintext: &str) -> Result<String, CoreError>;

    /// Check `plaintext` against a stored hash in constant time.
    ///
    /// Returns `Ok(false)` on mismatch; `Err` only when the stored hash is unusable.
    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, CoreError>;
}
