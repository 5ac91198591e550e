//! Token signing configuration

use serde::{Deserialize, Serialize};
use std::fmt;

use super::env_or;

const DEVELOPMENT_SECRET: &str = "development-secret-please-change-in-production";

/// JWT signing configuration
#[derive(Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// HMAC secret for signing tokens
    pub secret: String,

    /// Upper bound on a single revocation store call, in milliseconds
    #[serde(default = "default_storage_timeout_ms")]
    pub storage_timeout_ms: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEVELOPMENT_SECRET),
            storage_timeout_ms: default_storage_timeout_ms(),
        }
    }
}

impl JwtConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET")
            .unwrap_or_else(|_| DEVELOPMENT_SECRET.to_string());
        let storage_timeout_ms = env_or("JWT_STORAGE_TIMEOUT_MS", default_storage_timeout_ms());

        Self {
            secret,
            storage_timeout_ms,
        }
    }

    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    pub fn with_storage_timeout_ms(mut self, millis: u64) -> Self {
        self.storage_timeout_ms = millis;
        self
    }

    /// Check if using the development secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEVELOPMENT_SECRET
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("storage_timeout_ms", &self.storage_timeout_ms)
            .finish()
    }
}

fn default_storage_timeout_ms() -> u64 {
    2000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.storage_timeout_ms, 2000);
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret").with_storage_timeout_ms(500);

        assert_eq!(config.secret, "my-secret");
        assert_eq!(config.storage_timeout_ms, 500);
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_config_debug_hides_secret() {
        let config = JwtConfig::new("my-secret");
        assert!(!format!("{:?}", config).contains("my-secret"));
    }
}
