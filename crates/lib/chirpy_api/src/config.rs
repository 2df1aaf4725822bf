//! API server configuration.

use thiserror::Error;

/// Platform name that enables destructive admin endpoints.
pub const DEV_PLATFORM: &str = "dev";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set and non-empty")]
    Missing(&'static str),
}

/// Configuration for the API server. Built once at startup and never mutated.
#[derive(Clone)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:8080").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// JWT signing secret.
    pub jwt_secret: String,
    /// Shared secret presented by Polka on webhook calls.
    pub polka_key: String,
    /// Deployment platform; `dev` unlocks `/admin/reset`.
    pub platform: String,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("bind_addr", &self.bind_addr)
            .field("platform", &self.platform)
            .finish_non_exhaustive()
    }
}

impl ApiConfig {
    /// Reject configurations the auth layer cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::Missing("JWT_SECRET"));
        }
        if self.polka_key.is_empty() {
            return Err(ConfigError::Missing("POLKA_KEY"));
        }
        Ok(())
    }

    pub fn is_dev(&self) -> bool {
        self.platform == DEV_PLATFORM
    }
}
