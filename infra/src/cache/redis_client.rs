//! Redis client implementation
//!
//! Multiplexed async connection with bounded connect time and retry with
//! exponential backoff for transient failures.

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::config::CacheConfig;
use crate::InfrastructureError;

type RedisFuture<T> = Pin<Box<dyn Future<Output = RedisResult<T>> + Send>>;

/// SETNX is sent once: if the reply is lost after the write, a resend sees
/// the caller's own value and reports `false`.
pub(crate) const SET_NX_ATTEMPTS: u32 = 1;

/// Redis client with connection retry logic
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Configuration used to create this client
    config: CacheConfig,
    /// Maximum number of attempts for operations
    max_retries: u32,
    /// Base delay between retries (exponential backoff)
    retry_delay_ms: u64,
}

impl RedisClient {
    /// Create a new Redis client
    ///
    /// # Example
    /// ```no_run
    /// use cadence_infra::config::CacheConfig;
    /// use cadence_infra::cache::RedisClient;
    ///
    /// async fn create_client() -> Result<RedisClient, Box<dyn std::error::Error>> {
    ///     let client = RedisClient::new(CacheConfig::new("redis://localhost:6379")).await?;
    ///     Ok(client)
    /// }
    /// ```
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        Self::new_with_retry_config(config, 3, 100).await
    }

    /// Create a new Redis client with custom retry configuration
    ///
    /// # Arguments
    /// * `config` - Cache configuration settings
    /// * `max_retries` - Maximum number of attempts
    /// * `retry_delay_ms` - Base delay between retries in milliseconds
    pub async fn new_with_retry_config(
        config: CacheConfig,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<Self, InfrastructureError> {
        info!(url = %mask_url(&config.url), "Creating Redis client");

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!(error = %e, "Failed to parse Redis URL");
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connect_timeout = Duration::from_secs(config.connection_timeout);
        let connection =
            Self::create_connection_with_retry(client, connect_timeout, max_retries, retry_delay_ms)
                .await?;

        info!("Redis client created successfully");

        Ok(Self {
            connection,
            config,
            max_retries,
            retry_delay_ms,
        })
    }

    async fn create_connection_with_retry(
        client: Client,
        connect_timeout: Duration,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!(attempt = attempts, "Connecting to Redis");

            let outcome =
                tokio::time::timeout(connect_timeout, client.get_multiplexed_async_connection()).await;

            let failure = match outcome {
                Ok(Ok(connection)) => return Ok(connection),
                Ok(Err(e)) => InfrastructureError::Cache(e),
                Err(_) => InfrastructureError::Timeout(format!(
                    "Redis connect exceeded {}s",
                    connect_timeout.as_secs()
                )),
            };

            if attempts >= max_retries {
                error!(attempts, error = %failure, "Failed to connect to Redis");
                return Err(failure);
            }

            warn!(
                attempt = attempts,
                max_retries,
                retry_in_ms = delay,
                error = %failure,
                "Failed to connect to Redis, retrying"
            );
            sleep(Duration::from_millis(delay)).await;
            delay = (delay * 2).min(5000);
        }
    }

    /// Namespaced key for this client
    pub fn key(&self, key: &str) -> String {
        self.config.make_key(key)
    }

    /// Get a value
    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        let key = key.to_string();
        let value = self
            .execute_with_retry(move |mut conn| {
                let key = key.clone();
                Box::pin(async move { conn.get::<_, Option<String>>(key).await })
            })
            .await?;
        Ok(value)
    }

    /// Set a value without expiry, overwriting any existing one
    pub async fn set(&self, key: &str, value: &str) -> Result<(), InfrastructureError> {
        let (key, value) = (key.to_string(), value.to_string());
        self.execute_with_retry(move |mut conn| {
            let (key, value) = (key.clone(), value.clone());
            Box::pin(async move { conn.set::<_, _, ()>(key, value).await })
        })
        .await?;
        Ok(())
    }

    /// Set a value only if the key does not exist (`SETNX`)
    ///
    /// Returns `true` when the value was written.
    pub async fn set_nx(&self, key: &str, value: &str) -> Result<bool, InfrastructureError> {
        let (key, value) = (key.to_string(), value.to_string());
        let written = self
            .execute_with_attempts(SET_NX_ATTEMPTS, move |mut conn| {
                let (key, value) = (key.clone(), value.clone());
                Box::pin(async move { conn.set_nx::<_, _, bool>(key, value).await })
            })
            .await?;
        Ok(written)
    }

    /// Check if a key exists
    pub async fn exists(&self, key: &str) -> Result<bool, InfrastructureError> {
        let key = key.to_string();
        let exists = self
            .execute_with_retry(move |mut conn| {
                let key = key.clone();
                Box::pin(async move { conn.exists::<_, bool>(key).await })
            })
            .await?;
        Ok(exists)
    }

    /// Check if the Redis connection is healthy with a PING
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let response = self
            .execute_with_retry(|mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await?;
        Ok(response == "PONG")
    }

    async fn execute_with_retry<F, T>(&self, operation: F) -> RedisResult<T>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        self.execute_with_attempts(self.max_retries, operation).await
    }

    async fn execute_with_attempts<F, T>(&self, max_attempts: u32, operation: F) -> RedisResult<T>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        let connection = &self.connection;
        run_with_retry(max_attempts, self.retry_delay_ms, || operation(connection.clone())).await
    }
}

/// Run `operation` up to `max_attempts` times, backing off exponentially
/// between retriable failures
pub(crate) async fn run_with_retry<F, Fut, T>(
    max_attempts: u32,
    base_delay_ms: u64,
    mut operation: F,
) -> RedisResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = RedisResult<T>>,
{
    let mut attempts = 0;
    let mut delay = base_delay_ms;

    loop {
        attempts += 1;

        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) if attempts < max_attempts && is_retriable_error(&e) => {
                warn!(
                    attempt = attempts,
                    max_attempts,
                    retry_in_ms = delay,
                    error = %e,
                    "Redis operation failed, retrying"
                );
                sleep(Duration::from_millis(delay)).await;
                delay = (delay * 2).min(5000);
            }
            Err(e) => {
                error!(attempts, error = %e, "Redis operation failed");
                return Err(e);
            }
        }
    }
}

/// Whether a Redis error is transient and worth retrying
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::ClientError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}

/// Hide the password part of a connection URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };

    match rest.rsplit_once('@') {
        Some((credentials, host)) => {
            let user = credentials.split(':').next().unwrap_or_default();
            format!("{}://{}:****@{}", scheme, user, host)
        }
        None => url.to_string(),
    }
}
