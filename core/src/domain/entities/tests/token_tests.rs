//! Unit tests for token entities

use crate::domain::entities::token::{
    extract_claim, ClaimField, Claims, Role, TokenHeader, TokenPair, TokenPayload, TokenType,
    ACCESS_TOKEN_LIFETIME_SECONDS, REFRESH_TOKEN_LIFETIME_SECONDS,
};

#[test]
fn test_header_wire_form() {
    let header = serde_json::to_string(&TokenHeader::hs256()).unwrap();
    assert_eq!(header, r#"{"alg":"HS256","typ":"JWT"}"#);
    assert!(TokenHeader::hs256().is_hs256());

    let other = TokenHeader {
        alg: "none".to_string(),
        typ: "JWT".to_string(),
    };
    assert!(!other.is_hs256());
}

#[test]
fn test_payload_wire_form() {
    let payload =
        TokenPayload::new("listener@cadence.fm", Role::User, TokenType::Access, 1_000).unwrap();
    let json = serde_json::to_string(&payload).unwrap();

    assert_eq!(
        json,
        r#"{"email":"listener@cadence.fm","role":"USER","type":"access","iat":1000,"exp":4600}"#
    );
}

#[test]
fn test_payload_lifetimes() {
    let access = TokenPayload::new("a@cadence.fm", Role::Admin, TokenType::Access, 500).unwrap();
    assert_eq!(access.exp - access.iat, ACCESS_TOKEN_LIFETIME_SECONDS);
    assert_eq!(ACCESS_TOKEN_LIFETIME_SECONDS, 3600);

    let refresh =
        TokenPayload::new("a@cadence.fm", Role::Admin, TokenType::Refresh, 500).unwrap();
    assert_eq!(refresh.exp - refresh.iat, REFRESH_TOKEN_LIFETIME_SECONDS);
    assert_eq!(REFRESH_TOKEN_LIFETIME_SECONDS, 86400);
}

#[test]
fn test_payload_expiry_boundary() {
    let payload = TokenPayload::new("a@cadence.fm", Role::User, TokenType::Access, 0).unwrap();

    assert!(!payload.is_expired_at(3599));
    assert!(payload.is_expired_at(3600));
    assert!(payload.is_expired_at(3601));
}

#[test]
fn test_payload_expiry_overflow_is_rejected() {
    let near_max = i64::MAX - 10;

    assert!(TokenPayload::new("a@cadence.fm", Role::User, TokenType::Refresh, near_max).is_none());
    assert!(TokenPayload::new("a@cadence.fm", Role::User, TokenType::Access, near_max).is_none());

    let last = i64::MAX - REFRESH_TOKEN_LIFETIME_SECONDS;
    let payload = TokenPayload::new("a@cadence.fm", Role::User, TokenType::Refresh, last).unwrap();
    assert_eq!(payload.exp, i64::MAX);
}

#[test]
fn test_role_parsing() {
    assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
    assert_eq!("USER".parse::<Role>().unwrap(), Role::User);
    assert!("admin".parse::<Role>().is_err());
    assert_eq!(Role::Admin.to_string(), "ADMIN");
}

#[test]
fn test_claims_from_payload() {
    let payload =
        TokenPayload::new("a@cadence.fm", Role::Admin, TokenType::Refresh, 10).unwrap();
    let claims = Claims::from(payload);

    assert_eq!(claims.subject, "a@cadence.fm");
    assert_eq!(claims.token_type, TokenType::Refresh);
    assert_eq!(claims.issued_at, 10);
    assert_eq!(claims.expires_at, 10 + 86400);
    assert!(claims.is_admin());
}

#[test]
fn test_extract_claim_present_fields() {
    let payload = r#"{"email":"a@cadence.fm","role":"ADMIN","type":"access","iat":7,"exp":3607}"#;

    assert_eq!(extract_claim(payload, ClaimField::Email), "a@cadence.fm");
    assert_eq!(extract_claim(payload, ClaimField::Role), "ADMIN");
    assert_eq!(extract_claim(payload, ClaimField::Type), "access");
    assert_eq!(extract_claim(payload, ClaimField::IssuedAt), "7");
    assert_eq!(extract_claim(payload, ClaimField::ExpiresAt), "3607");
}

#[test]
fn test_extract_claim_missing_field_defaults_to_empty() {
    let payload = r#"{"email":"a@cadence.fm","role":null}"#;

    assert_eq!(extract_claim(payload, ClaimField::Role), "");
    assert_eq!(extract_claim(payload, ClaimField::Type), "");
    assert_eq!(extract_claim("not json", ClaimField::Email), "");
    assert_eq!(extract_claim("[1,2]", ClaimField::Email), "");
}

#[test]
fn test_token_pair_lifetimes() {
    let pair = TokenPair::new("access".to_string(), "refresh".to_string());

    assert_eq!(pair.token_type, "Bearer");
    assert_eq!(pair.access_expires_in, 3600);
    assert_eq!(pair.refresh_expires_in, 86400);
}
