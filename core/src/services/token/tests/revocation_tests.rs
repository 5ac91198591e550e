//! Unit tests for per-user mass revocation

use std::sync::Arc;

use crate::domain::entities::token::{Role, TokenType};
use crate::errors::{DomainError, TokenError};
use crate::repositories::{InMemoryRevocationRepository, RevocationRepository};
use crate::services::token::{TokenAuthority, TokenAuthorityConfig};

use super::fakes::token_error;

fn create_authority() -> TokenAuthority<InMemoryRevocationRepository> {
    TokenAuthority::new(
        InMemoryRevocationRepository::new(),
        TokenAuthorityConfig::new("revocation-test-secret"),
    )
}

#[tokio::test]
async fn test_revoke_all_revokes_earlier_tokens_only() {
    let authority = create_authority();

    let before = authority.issue("u@cadence.fm", Role::User, TokenType::Access, 100).unwrap();
    let record = authority.revoke_all("u@cadence.fm", 200).await.unwrap();
    assert_eq!(record.email, "u@cadence.fm");
    assert_eq!(record.invalidated_before, 200);

    assert_eq!(
        token_error(authority.verify(&before, 250).await),
        TokenError::TokenRevoked
    );

    let after = authority.issue("u@cadence.fm", Role::User, TokenType::Access, 300).unwrap();
    let claims = authority.verify(&after, 300).await.unwrap();
    assert_eq!(claims.subject, "u@cadence.fm");
}

#[tokio::test]
async fn test_token_issued_at_cutoff_is_revoked() {
    let authority = create_authority();

    let token = authority.issue("u@cadence.fm", Role::User, TokenType::Refresh, 200).unwrap();
    authority.revoke_all("u@cadence.fm", 200).await.unwrap();

    assert_eq!(
        token_error(authority.verify(&token, 201).await),
        TokenError::TokenRevoked
    );
}

#[tokio::test]
async fn test_revocation_is_checked_before_expiry() {
    let authority = create_authority();

    let token = authority.issue("u@cadence.fm", Role::User, TokenType::Access, 100).unwrap();
    authority.revoke_all("u@cadence.fm", 200).await.unwrap();

    assert_eq!(
        token_error(authority.verify(&token, 100 + 3600).await),
        TokenError::TokenRevoked
    );
}

#[tokio::test]
async fn test_revocation_is_per_subject() {
    let authority = create_authority();

    let other = authority.issue("other@cadence.fm", Role::User, TokenType::Access, 100).unwrap();
    authority.revoke_all("u@cadence.fm", 200).await.unwrap();

    assert!(authority.verify(&other, 250).await.is_ok());
}

#[tokio::test]
async fn test_second_revoke_keeps_first_timestamp() {
    let authority = create_authority();

    authority.revoke_all("u@cadence.fm", 200).await.unwrap();
    let second = authority.revoke_all("u@cadence.fm", 500).await;

    assert_eq!(
        token_error(second),
        TokenError::AlreadyRevoked {
            invalidated_before: 200
        }
    );

    let stored = authority.repository().get("u@cadence.fm").await.unwrap().unwrap();
    assert_eq!(stored.invalidated_before, 200);

    // A token issued between the two calls stays valid
    let between = authority.issue("u@cadence.fm", Role::User, TokenType::Access, 400).unwrap();
    assert!(authority.verify(&between, 500).await.is_ok());
}

#[tokio::test]
async fn test_refresh_after_revocation_is_rejected() {
    let authority = create_authority();

    let pair = authority.issue_pair("u@cadence.fm", Role::User, 100).unwrap();
    authority.revoke_all("u@cadence.fm", 150).await.unwrap();

    assert_eq!(
        token_error(authority.refresh(&pair.refresh_token, 160).await),
        TokenError::TokenRevoked
    );
}

#[tokio::test]
async fn test_revoke_all_rejects_empty_subject() {
    let authority = create_authority();

    assert!(matches!(
        authority.revoke_all("", 100).await,
        Err(DomainError::Validation { .. })
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_revoke_all_has_single_winner() {
    let authority = Arc::new(create_authority());

    let mut handles = Vec::new();
    for i in 0..16 {
        let authority = Arc::clone(&authority);
        handles.push(tokio::spawn(async move {
            authority.revoke_all("race@cadence.fm", 1_000 + i).await
        }));
    }

    let mut winners = Vec::new();
    let mut losers = Vec::new();
    for handle in handles {
        match handle.await.unwrap() {
            Ok(record) => winners.push(record.invalidated_before),
            Err(err) => losers.push(token_error::<()>(Err(err))),
        }
    }

    assert_eq!(winners.len(), 1);
    assert_eq!(losers.len(), 15);
    for loser in losers {
        assert_eq!(
            loser,
            TokenError::AlreadyRevoked {
                invalidated_before: winners[0]
            }
        );
    }

    let stored = authority.repository().get("race@cadence.fm").await.unwrap().unwrap();
    assert_eq!(stored.invalidated_before, winners[0]);
}
