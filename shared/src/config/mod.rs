//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Token signing configuration
//! - `cache` - Redis configuration
//! - `database` - Database connection and pool configuration
//! - `environment` - Deployment environment
//! - `logging` - Log filter and format
//! - `server` - HTTP server configuration
//! - `storage` - Revocation store backend selection
//!
//! Every section has a `Default` and a `from_env()` constructor.

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod logging;
pub mod server;
pub mod storage;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::JwtConfig;
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use logging::{LogFormat, LoggingConfig};
pub use server::ServerConfig;
pub use storage::RevocationBackend;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Redis configuration
    pub cache: CacheConfig,

    /// Token signing configuration
    pub jwt: JwtConfig,

    /// Revocation store backend
    #[serde(default)]
    pub revocation_backend: RevocationBackend,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();

        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
            jwt: JwtConfig::from_env(),
            revocation_backend: RevocationBackend::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }
}

/// Reads and parses an environment variable, falling back to `default`
/// when it is unset or does not parse
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
