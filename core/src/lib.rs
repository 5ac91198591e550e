//! # Cadence Core
//!
//! Core domain layer for the Cadence backend.
//! This crate contains the session token entities, the token authority that
//! issues, verifies and revokes them, the revocation repository interface,
//! and the error types shared by the outer layers.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::entities::{
    ClaimField, Claims, RevocationRecord, Role, TokenPair, TokenPayload, TokenType,
};
pub use errors::{AuthError, DomainError, DomainResult, TokenError};
pub use repositories::{InMemoryRevocationRepository, RevocationRepository};
pub use services::{Clock, FixedClock, SystemClock, TokenAuthority, TokenAuthorityConfig};
