//! In-memory implementation of RevocationRepository
//!
//! Used in tests and for single-process development setups.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::revocation::RevocationRecord;
use crate::errors::DomainError;

use super::r#trait::RevocationRepository;

/// In-memory revocation repository
#[derive(Clone)]
pub struct InMemoryRevocationRepository {
    records: Arc<RwLock<HashMap<String, RevocationRecord>>>,
}

impl InMemoryRevocationRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl Default for InMemoryRevocationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RevocationRepository for InMemoryRevocationRepository {
    async fn get(&self, email: &str) -> Result<Option<RevocationRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(email).cloned())
    }

    async fn exists(&self, email: &str) -> Result<bool, DomainError> {
        let records = self.records.read().await;
        Ok(records.contains_key(email))
    }

    async fn put(&self, record: RevocationRecord) -> Result<RevocationRecord, DomainError> {
        let mut records = self.records.write().await;
        records.insert(record.email.clone(), record.clone());
        Ok(record)
    }

    async fn put_if_absent(&self, record: RevocationRecord) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;

        if records.contains_key(&record.email) {
            return Ok(false);
        }

        records.insert(record.email.clone(), record);
        Ok(true)
    }
}
