//! Cache module for Redis-backed revocation storage
//!
//! Provides a Redis client with connection retry and bounded connect time,
//! and the revocation repository built on it.

pub mod redis_client;
pub mod revocation_store;


pub use redis_client::RedisClient;
pub use revocation_store::RedisRevocationRepository;

// Re-export commonly used types
pub use cadence_shared::config::CacheConfig;
