//! Shared configuration and common types for the Cadence server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Error codes
//! - API response wrappers

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, DatabaseConfig, Environment, JwtConfig, LogFormat, LoggingConfig,
    RevocationBackend, ServerConfig,
};
pub use errors::error_codes;
pub use types::{ApiResponse, HealthResponse, HealthStatus, ServiceHealth};
