//! Shared fixtures for the api integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use async_trait::async_trait;
use cadence_api::Authority;
use cadence_core::{
    DomainError, FixedClock, InMemoryRevocationRepository, RevocationRecord,
    RevocationRepository, Role, TokenAuthority, TokenAuthorityConfig, TokenType,
};
use cadence_infra::SharedRevocationRepository;

pub const SECRET: &str = "integration-test-secret";
pub const NOW: i64 = 1_700_000_000;

pub const USER: &str = "listener@example.com";
pub const ADMIN: &str = "curator@example.com";

/// Authority over an in-memory store whose clock the test controls
pub fn authority() -> (web::Data<Authority>, Arc<FixedClock>) {
    authority_with(Arc::new(InMemoryRevocationRepository::new()))
}

pub fn authority_with(repository: SharedRevocationRepository) -> (web::Data<Authority>, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(NOW));
    let authority = TokenAuthority::with_clock(
        repository,
        TokenAuthorityConfig::new(SECRET),
        clock.clone(),
    );
    (web::Data::new(authority), clock)
}

pub fn access_token(authority: &Authority, email: &str, role: Role, iat: i64) -> String {
    authority.issue(email, role, TokenType::Access, iat).unwrap()
}

pub fn refresh_token(authority: &Authority, email: &str, iat: i64) -> String {
    authority.issue(email, Role::User, TokenType::Refresh, iat).unwrap()
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

/// Store whose every call fails
pub struct UnreachableStore;

#[async_trait]
impl RevocationRepository for UnreachableStore {
    async fn get(&self, _email: &str) -> Result<Option<RevocationRecord>, DomainError> {
        Err(unreachable())
    }

    async fn exists(&self, _email: &str) -> Result<bool, DomainError> {
        Err(unreachable())
    }

    async fn put(&self, _record: RevocationRecord) -> Result<RevocationRecord, DomainError> {
        Err(unreachable())
    }

    async fn put_if_absent(&self, _record: RevocationRecord) -> Result<bool, DomainError> {
        Err(unreachable())
    }

    async fn health_check(&self) -> Result<(), DomainError> {
        Err(unreachable())
    }
}

fn unreachable() -> DomainError {
    DomainError::Internal {
        message: "connection refused".to_string(),
    }
}
