//! Redis settings for the revocation store

use serde::{Deserialize, Serialize};

use super::env_or;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CacheConfig {
    /// `redis://[:password@]host:port[/db]`
    pub url: String,

    /// Seconds to wait for each connection attempt
    pub connection_timeout: u64,

    /// Namespace for every key, so several deployments can share one Redis
    #[serde(default)]
    pub key_prefix: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new("redis://localhost:6379")
    }
}

impl CacheConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            connection_timeout: 5,
            key_prefix: None,
        }
    }

    /// Reads `REDIS_URL`, `REDIS_CONNECTION_TIMEOUT` and `REDIS_KEY_PREFIX`
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            url: std::env::var("REDIS_URL").unwrap_or(defaults.url),
            connection_timeout: env_or("REDIS_CONNECTION_TIMEOUT", defaults.connection_timeout),
            key_prefix: std::env::var("REDIS_KEY_PREFIX")
                .ok()
                .filter(|prefix| !prefix.is_empty()),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// `{prefix}:{key}`, or `key` alone without a prefix
    pub fn make_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}
