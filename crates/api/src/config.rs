use std::str::FromStr;

use axum::http::HeaderValue;

use crate::auth::jwt::{JwtConfig, DEFAULT_SESSION_EXPIRY_MINS};
use crate::auth::password::HashingConfig;

/// Default minimum password length for registration and password changes.
const DEFAULT_PASSWORD_MIN_LENGTH: usize = 8;

/// Configuration could not be loaded from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set in the environment")]
    Missing(&'static str),

    #[error("{var} has an invalid value: '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Deployment environment name (default: `development`).
    pub app_env: String,
    /// Minimum password length (default: `8`).
    pub password_min_length: usize,
    /// Session token configuration (secret, lifetime).
    pub jwt: JwtConfig,
    /// Argon2id cost parameters.
    pub hashing: HashingConfig,
    /// PostgreSQL URL; `None` selects the in-memory store.
    pub database_url: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                       |
    /// |------------------------|-----------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                     |
    /// | `PORT`                 | `3000`                                        |
    /// | `CORS_ORIGINS`         | `http://localhost:5173,http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                          |
    /// | `APP_ENV`              | `development`                                 |
    /// | `PASSWORD_MIN_LENGTH`  | `8`                                           |
    /// | `JWT_SECRET`           | **required**                                  |
    /// | `SESSION_EXPIRY_MINS`  | `1440`                                        |
    /// | `ARGON2_MEMORY_KIB`    | `19456`                                       |
    /// | `ARGON2_ITERATIONS`    | `2`                                           |
    /// | `ARGON2_PARALLELISM`   | `1`                                           |
    /// | `DATABASE_URL`         | unset (in-memory store)                       |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let host = env.string("HOST", "0.0.0.0");
        let port = env.parsed("PORT", 3000u16)?;

        let cors_origins: Vec<String> = env
            .string("CORS_ORIGINS", "http://localhost:5173,http://localhost:3000")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        for origin in &cors_origins {
            if HeaderValue::from_str(origin).is_err() {
                return Err(ConfigError::Invalid {
                    var: "CORS_ORIGINS",
                    value: origin.clone(),
                });
            }
        }

        let request_timeout_secs = env.parsed("REQUEST_TIMEOUT_SECS", 30u64)?;
        let app_env = env.string("APP_ENV", "development");
        let password_min_length =
            env.parsed("PASSWORD_MIN_LENGTH", DEFAULT_PASSWORD_MIN_LENGTH)?;

        let secret = env
            .get("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;
        let session_expiry_mins =
            env.parsed("SESSION_EXPIRY_MINS", DEFAULT_SESSION_EXPIRY_MINS)?;
        if session_expiry_mins <= 0 {
            return Err(ConfigError::Invalid {
                var: "SESSION_EXPIRY_MINS",
                value: session_expiry_mins.to_string(),
            });
        }

        let defaults = HashingConfig::default();
        let hashing = HashingConfig {
            memory_kib: env.parsed("ARGON2_MEMORY_KIB", defaults.memory_kib)?,
            iterations: env.parsed("ARGON2_ITERATIONS", defaults.iterations)?,
            parallelism: env.parsed("ARGON2_PARALLELISM", defaults.parallelism)?,
        };
        if hashing.params().is_err() {
            return Err(ConfigError::Invalid {
                var: "ARGON2_*",
                value: format!(
                    "m={},t={},p={}",
                    hashing.memory_kib, hashing.iterations, hashing.parallelism
                ),
            });
        }

        let database_url = env.get("DATABASE_URL").filter(|s| !s.is_empty());

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            app_env,
            password_min_length,
            jwt: JwtConfig {
                secret,
                session_expiry_mins,
            },
            hashing,
            database_url,
        })
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }
}

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, var: &str) -> Option<String> {
        (self.0)(var)
    }

    fn string(&self, var: &str, default: &str) -> String {
        self.get(var).unwrap_or_else(|| default.to_string())
    }

    fn parsed<T: FromStr>(&self, var: &'static str, default: T) -> Result<T, ConfigError> {
        match self.get(var) {
            None => Ok(default),
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { var, value: raw }),
        }
    }
}
