//! Revocation repository trait defining the interface for per-user revocation records.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::entities::revocation::RevocationRecord;
use crate::errors::DomainError;

/// Repository trait for RevocationRecord persistence operations
///
/// Records are keyed by email, one per user. Implementations must make
/// `put_if_absent` atomic so that concurrent revocations of the same user
/// cannot both believe they created the record.
#[async_trait]
pub trait RevocationRepository: Send + Sync {
    /// Find the revocation record of a user
    ///
    /// # Arguments
    /// * `email` - Subject identifier
    ///
    /// # Returns
    /// * `Ok(Some(RevocationRecord))` - User has revoked their sessions
    /// * `Ok(None)` - User has never revoked their sessions
    /// * `Err(DomainError)` - Storage error occurred
    ///
    /// # Example
    /// ```no_run
    /// # use cadence_core::repositories::RevocationRepository;
    /// # async fn example(repo: &impl RevocationRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// if let Some(record) = repo.get("listener@cadence.fm").await? {
    ///     println!("Sessions revoked before {}", record.invalidated_before);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn get(&self, email: &str) -> Result<Option<RevocationRecord>, DomainError>;

    /// Check whether a user has a revocation record
    async fn exists(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.get(email).await?.is_some())
    }

    /// Store a record, replacing any existing record for the same email
    ///
    /// # Returns
    /// * `Ok(RevocationRecord)` - The stored record
    /// * `Err(DomainError)` - Storage error occurred
    async fn put(&self, record: RevocationRecord) -> Result<RevocationRecord, DomainError>;

    /// Store a record only if the email has none yet
    ///
    /// # Returns
    /// * `Ok(true)` - Record inserted
    /// * `Ok(false)` - A record already existed and was left unchanged
    /// * `Err(DomainError)` - Storage error occurred
    ///
    /// # Example
    /// ```no_run
    /// # use cadence_core::repositories::RevocationRepository;
    /// # use cadence_core::domain::entities::RevocationRecord;
    /// # async fn example(repo: &impl RevocationRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// let record = RevocationRecord::new("listener@cadence.fm", 1_700_000_000);
    ///
    /// if !repo.put_if_absent(record).await? {
    ///     println!("Sessions were already revoked");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn put_if_absent(&self, record: RevocationRecord) -> Result<bool, DomainError>;

    /// Check that the backing store is reachable
    async fn health_check(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

#[async_trait]
impl<T: RevocationRepository + ?Sized> RevocationRepository for Arc<T> {
    async fn get(&self, email: &str) -> Result<Option<RevocationRecord>, DomainError> {
        (**self).get(email).await
    }

    async fn exists(&self, email: &str) -> Result<bool, DomainError> {
        (**self).exists(email).await
    }

    async fn put(&self, record: RevocationRecord) -> Result<RevocationRecord, DomainError> {
        (**self).put(record).await
    }

    async fn put_if_absent(&self, record: RevocationRecord) -> Result<bool, DomainError> {
        (**self).put_if_absent(record).await
    }

    async fn health_check(&self) -> Result<(), DomainError> {
        (**self).health_check().await
    }
}
