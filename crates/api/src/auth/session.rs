//! The session authenticator.
//!
//! Turns credentials into session tokens and session tokens back into a
//! [`UserIdentity`]. Password hashing goes through the [`CredentialHasher`]
//! capability; persistence goes through the [`EntityStore`].

use std::sync::Arc;

use repairdesk_core::error::{AuthError, CoreError};
use repairdesk_core::hashing::CredentialHasher;
use repairdesk_core::ownership::UserIdentity;
use repairdesk_core::types::DbId;
use repairdesk_db::models::user::{CreateUser, User};
use repairdesk_db::{EntityStore, StoreError};

use crate::auth::jwt::{generate_session_token, validate_token, JwtConfig};
use crate::auth::password::validate_password_strength;

/// Plaintext used to build the decoy hash for unknown accounts.
const DECOY_PASSWORD: &str = "repairdesk-decoy-password";

/// A freshly issued session.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Registration input after transport-level parsing.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Verifies credentials and session tokens. Cheap to clone.
#[derive(Clone)]
pub struct Authenticator {
    store: Arc<dyn EntityStore>,
    hasher: Arc<dyn CredentialHasher>,
    jwt: JwtConfig,
    password_min_length: usize,
    /// Verified against when the account does not exist, so an unknown
    /// identifier costs the same as a wrong password.
    decoy_hash: Arc<str>,
}

impl Authenticator {
    pub fn new(
        store: Arc<dyn EntityStore>,
        hasher: Arc<dyn CredentialHasher>,
        jwt: JwtConfig,
        password_min_length: usize,
    ) -> Result<Self, CoreError> {
        let decoy_hash = hasher.hash(DECOY_PASSWORD)?.into();
        Ok(Self {
            store,
            hasher,
            jwt,
            password_min_length,
            decoy_hash,
        })
    }

    pub fn jwt(&self) -> &JwtConfig {
        &self.jwt
    }

    /// Create an account and open a session for it.
    ///
    /// The plaintext is hashed before it reaches the store and is never logged.
    pub async fn register(&self, input: &Registration) -> Result<Session, AuthError> {
        // Login routes identifiers containing '@' to the email lookup.
        if input.username.contains('@') {
            return Err(CoreError::Validation("username must not contain '@'".to_string()).into());
        }
        validate_password_strength(&input.password, self.password_min_length)
            .map_err(CoreError::Validation)?;

        let password_hash = self.hasher.hash(&input.password)?;
        let user = self
            .store
            .insert_user(&CreateUser {
                username: input.username.clone(),
                email: input.email.clone(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                StoreError::UniqueViolation(_) => AuthError::DuplicateAccount,
                other => AuthError::Core(other.into()),
            })?;

        tracing::info!(user_id = user.id, "User registered");
        self.open_session(user)
    }

    /// Exchange credentials for a session.
    ///
    /// `identifier` is an email when it contains `@`, otherwise a username.
    /// An unknown account and a wrong password both yield `InvalidCredentials`.
    pub async fn login(&self, identifier: &str, plaintext: &str) -> Result<Session, AuthError> {
        let lookup = if identifier.contains('@') {
            self.store.find_user_by_email(identifier).await
        } else {
            self.store.find_user_by_username(identifier).await
        };
        let found = lookup.map_err(CoreError::from)?;

        let Some(user) = found else {
            // Burn the same hashing work as a real verification.
            self.hasher.verify(plaintext, &self.decoy_hash)?;
            return Err(AuthError::InvalidCredentials);
        };

        if !self.hasher.verify(plaintext, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(user_id = user.id, "User logged in");
        self.open_session(user)
    }

    /// Resolve a session token to a live user.
    ///
    /// Read-only: the token's expiry is never extended.
    pub async fn authenticate(&self, token: &str) -> Result<UserIdentity, AuthError> {
        let claims = validate_token(token, &self.jwt)?;
        let user = self.load_user(claims.sub).await?;
        Ok(user.identity())
    }

    /// Full user record for the profile endpoint.
    pub async fn load_user(&self, user_id: DbId) -> Result<User, AuthError> {
        self.store
            .find_user_by_id(user_id)
            .await
            .map_err(CoreError::from)?
            .ok_or(AuthError::UserNotFound)
    }

    /// Change a password after verifying the current one.
    ///
    /// The hash is rewritten only when the plaintext actually changes;
    /// returns whether a new hash was stored.
    pub async fn set_password(
        &self,
        user: &UserIdentity,
        current: &str,
        new: &str,
    ) -> Result<bool, AuthError> {
        let record = self.load_user(user.id).await?;
        if !self.hasher.verify(current, &record.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        if current == new {
            return Ok(false);
        }
        validate_password_strength(new, self.password_min_length)
            .map_err(CoreError::Validation)?;

        let new_hash = self.hasher.hash(new)?;
        let updated = self
            .store
            .update_user_password(record.id, &new_hash)
            .await
            .map_err(CoreError::from)?;
        if !updated {
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(user_id = record.id, "Password changed");
        Ok(true)
    }

    fn open_session(&self, user: User) -> Result<Session, AuthError> {
        let token = generate_session_token(user.id, &self.jwt)
            .map_err(|e| CoreError::Internal(format!("Token generation error: {e}")))?;
        Ok(Session { token, user })
    }
}
