//! Domain-specific error types for token and request authentication
//!
//! `TokenError` covers the token lifecycle (decode, signature, expiry,
//! revocation, signing and storage), `AuthError` covers request-level
//! authentication failures raised by the HTTP edge.

use thiserror::Error;

/// Token lifecycle errors
///
/// None of the messages carry key material or token contents.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token")]
    MalformedToken,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Token expired")]
    TokenExpired,

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Token signing failed")]
    SigningError,

    #[error("Revocation store unavailable")]
    StorageUnavailable,

    #[error("Sessions already revoked at {invalidated_before}")]
    AlreadyRevoked { invalidated_before: i64 },

    #[error("Expected a {expected} token")]
    TokenTypeMismatch { expected: String },
}

impl TokenError {
    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::MalformedToken => "TOKEN_MALFORMED",
            TokenError::InvalidSignature => "TOKEN_INVALID_SIGNATURE",
            TokenError::TokenExpired => "TOKEN_EXPIRED",
            TokenError::TokenRevoked => "TOKEN_REVOKED",
            TokenError::SigningError => "TOKEN_SIGNING_FAILED",
            TokenError::StorageUnavailable => "STORAGE_UNAVAILABLE",
            TokenError::AlreadyRevoked { .. } => "ALREADY_REVOKED",
            TokenError::TokenTypeMismatch { .. } => "TOKEN_TYPE_MISMATCH",
        }
    }

    /// Whether the failure means the presented credentials were rejected,
    /// as opposed to the authority being unable to decide
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            TokenError::MalformedToken
                | TokenError::InvalidSignature
                | TokenError::TokenExpired
                | TokenError::TokenRevoked
                | TokenError::TokenTypeMismatch { .. }
        )
    }
}

/// Request authentication errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing or invalid Authorization header")]
    MissingCredentials,

    #[error("You are not authorized to perform this operation")]
    InsufficientPermissions,
}

impl AuthError {
    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingCredentials => "MISSING_CREDENTIALS",
            AuthError::InsufficientPermissions => "INSUFFICIENT_PERMISSIONS",
        }
    }
}
