//! Revocation repositories that misbehave, for storage failure tests

use async_trait::async_trait;

use crate::domain::entities::revocation::RevocationRecord;
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::RevocationRepository;

/// Every call returns an error
pub struct FailingRevocationRepository;

#[async_trait]
impl RevocationRepository for FailingRevocationRepository {
    async fn get(&self, _email: &str) -> Result<Option<RevocationRecord>, DomainError> {
        Err(unreachable_store())
    }

    async fn exists(&self, _email: &str) -> Result<bool, DomainError> {
        Err(unreachable_store())
    }

    async fn put(&self, _record: RevocationRecord) -> Result<RevocationRecord, DomainError> {
        Err(unreachable_store())
    }

    async fn put_if_absent(&self, _record: RevocationRecord) -> Result<bool, DomainError> {
        Err(unreachable_store())
    }
}

fn unreachable_store() -> DomainError {
    DomainError::Internal {
        message: "connection refused".to_string(),
    }
}

/// Every call never completes
pub struct HangingRevocationRepository;

#[async_trait]
impl RevocationRepository for HangingRevocationRepository {
    async fn get(&self, _email: &str) -> Result<Option<RevocationRecord>, DomainError> {
        std::future::pending().await
    }

    async fn exists(&self, _email: &str) -> Result<bool, DomainError> {
        std::future::pending().await
    }

    async fn put(&self, _record: RevocationRecord) -> Result<RevocationRecord, DomainError> {
        std::future::pending().await
    }

    async fn put_if_absent(&self, _record: RevocationRecord) -> Result<bool, DomainError> {
        std::future::pending().await
    }
}

/// Unwraps the token error of a failed call
pub fn token_error<T: std::fmt::Debug>(result: DomainResult<T>) -> TokenError {
    match result {
        Err(DomainError::Token(err)) => err,
        other => panic!("expected a token error, got {:?}", other),
    }
}
