//! Revocation store backend selection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where revocation records live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RevocationBackend {
    /// MySQL `invalidated_tokens` table
    #[default]
    Mysql,
    /// Redis keys, one per user
    Redis,
    /// Process memory; lost on restart
    Memory,
}

impl RevocationBackend {
    /// Read `REVOCATION_BACKEND`, defaulting to MySQL
    pub fn from_env() -> Self {
        std::env::var("REVOCATION_BACKEND")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// Whether records survive a process restart
    pub fn is_durable(&self) -> bool {
        !matches!(self, RevocationBackend::Memory)
    }
}

impl fmt::Display for RevocationBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RevocationBackend::Mysql => write!(f, "mysql"),
            RevocationBackend::Redis => write!(f, "redis"),
            RevocationBackend::Memory => write!(f, "memory"),
        }
    }
}

impl FromStr for RevocationBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mysql" => Ok(RevocationBackend::Mysql),
            "redis" => Ok(RevocationBackend::Redis),
            "memory" | "in-memory" => Ok(RevocationBackend::Memory),
            _ => Err(format!("Invalid revocation backend: {}", s)),
        }
    }
}
