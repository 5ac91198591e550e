//! Configuration for the token authority

use std::fmt;
use std::time::Duration;

use cadence_shared::config::JwtConfig;

/// Default bound on a single revocation store call
pub const DEFAULT_STORAGE_TIMEOUT: Duration = Duration::from_millis(2000);

/// Configuration for the token authority
#[derive(Clone)]
pub struct TokenAuthorityConfig {
    /// HMAC signing secret, loaded once at startup
    pub secret: String,
    /// Upper bound on each revocation store call
    pub storage_timeout: Duration,
}

impl TokenAuthorityConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            storage_timeout: DEFAULT_STORAGE_TIMEOUT,
        }
    }

    pub fn with_storage_timeout(mut self, timeout: Duration) -> Self {
        self.storage_timeout = timeout;
        self
    }
}

impl fmt::Debug for TokenAuthorityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenAuthorityConfig")
            .field("secret", &"[REDACTED]")
            .field("storage_timeout", &self.storage_timeout)
            .finish()
    }
}

impl From<&JwtConfig> for TokenAuthorityConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            storage_timeout: Duration::from_millis(config.storage_timeout_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let config = TokenAuthorityConfig::new("super-secret-signing-key");
        let rendered = format!("{:?}", config);

        assert!(!rendered.contains("super-secret-signing-key"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn test_from_jwt_config() {
        let jwt = JwtConfig {
            secret: "from-env".to_string(),
            storage_timeout_ms: 350,
        };
        let config = TokenAuthorityConfig::from(&jwt);

        assert_eq!(config.secret, "from-env");
        assert_eq!(config.storage_timeout, Duration::from_millis(350));
    }
}
