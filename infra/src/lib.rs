//! # Infrastructure Layer
//!
//! Concrete storage for the Cadence token authority.
//!
//! ## Architecture
//!
//! - **Database**: MySQL revocation records using SQLx
//! - **Cache**: Redis revocation records with retrying client
//!
//! [`build_revocation_repository`] picks one of them, or the in-memory
//! store from `cadence_core`, according to configuration.

use std::sync::Arc;

use cadence_core::repositories::{InMemoryRevocationRepository, RevocationRepository};
use cadence_shared::config::RevocationBackend;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Cache module - Redis client and operations
pub mod cache;

pub use cache::{RedisClient, RedisRevocationRepository};
pub use database::{DatabasePool, MySqlRevocationRepository};

/// Configuration module for infrastructure services
pub mod config {
    //! Configuration for the revocation store backends

    use serde::{Deserialize, Serialize};

    pub use cadence_shared::config::{CacheConfig, DatabaseConfig, RevocationBackend};

    /// Infrastructure configuration settings
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct InfraConfig {
        /// Which store holds revocation records
        pub backend: RevocationBackend,
        /// Database configuration
        pub database: DatabaseConfig,
        /// Redis configuration
        pub cache: CacheConfig,
    }

    impl InfraConfig {
        /// Load from environment, reading `.env` first if present
        pub fn from_env() -> Self {
            dotenvy::dotenv().ok();

            Self {
                backend: RevocationBackend::from_env(),
                database: DatabaseConfig::from_env(),
                cache: CacheConfig::from_env(),
            }
        }
    }
}

pub use config::InfraConfig;

/// Shared handle to whichever revocation store is configured
pub type SharedRevocationRepository = Arc<dyn RevocationRepository>;

/// Connect to the configured revocation store
///
/// For MySQL the `invalidated_tokens` table is created when missing.
pub async fn build_revocation_repository(
    config: &InfraConfig,
) -> Result<SharedRevocationRepository, InfrastructureError> {
    tracing::info!(backend = %config.backend, "Initializing revocation store");

    let repository: SharedRevocationRepository = match config.backend {
        RevocationBackend::Mysql => {
            let pool = DatabasePool::new(config.database.clone()).await?;
            Arc::new(pool.revocation_repository().await?)
        }
        RevocationBackend::Redis => {
            let client = RedisClient::new(config.cache.clone()).await?;
            Arc::new(RedisRevocationRepository::new(client))
        }
        RevocationBackend::Memory => {
            tracing::warn!("Using in-memory revocation store; revocations are lost on restart");
            Arc::new(InMemoryRevocationRepository::new())
        }
    };

    tracing::info!(backend = %config.backend, "Revocation store ready");
    Ok(repository)
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection attempt exceeded its timeout
    #[error("Connection timed out: {0}")]
    Timeout(String),
}

impl From<InfrastructureError> for cadence_core::errors::DomainError {
    fn from(err: InfrastructureError) -> Self {
        cadence_core::errors::DomainError::Internal {
            message: err.to_string(),
        }
    }
}
