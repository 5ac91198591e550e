//! Redis implementation of the RevocationRepository trait.
//!
//! Each record is a plain key `revocation:{email}` holding the cut-off as a
//! decimal string. Records never expire.

use async_trait::async_trait;

use cadence_core::domain::entities::revocation::RevocationRecord;
use cadence_core::errors::DomainError;
use cadence_core::repositories::RevocationRepository;

use super::redis_client::RedisClient;

const KEY_NAMESPACE: &str = "revocation";

/// Redis implementation of RevocationRepository
#[derive(Clone)]
pub struct RedisRevocationRepository {
    client: RedisClient,
}

impl RedisRevocationRepository {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn key(&self, email: &str) -> String {
        self.client.key(&revocation_key(email))
    }
}

pub(crate) fn revocation_key(email: &str) -> String {
    format!("{}:{}", KEY_NAMESPACE, email)
}

#[async_trait]
impl RevocationRepository for RedisRevocationRepository {
    async fn get(&self, email: &str) -> Result<Option<RevocationRecord>, DomainError> {
        let value = self.client.get(&self.key(email)).await?;

        match value {
            Some(raw) => {
                let invalidated_before = raw.parse::<i64>().map_err(|_| DomainError::Internal {
                    message: format!("Corrupt revocation record for {}", email),
                })?;
                Ok(Some(RevocationRecord::new(email, invalidated_before)))
            }
            None => Ok(None),
        }
    }

    async fn exists(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.client.exists(&self.key(email)).await?)
    }

    async fn put(&self, record: RevocationRecord) -> Result<RevocationRecord, DomainError> {
        self.client
            .set(&self.key(&record.email), &record.invalidated_before.to_string())
            .await?;
        Ok(record)
    }

    async fn put_if_absent(&self, record: RevocationRecord) -> Result<bool, DomainError> {
        Ok(self
            .client
            .set_nx(&self.key(&record.email), &record.invalidated_before.to_string())
            .await?)
    }

    async fn health_check(&self) -> Result<(), DomainError> {
        if self.client.health_check().await? {
            Ok(())
        } else {
            Err(DomainError::Internal {
                message: "Redis did not answer PING".to_string(),
            })
        }
    }
}
