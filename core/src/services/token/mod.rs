//! Token authority module for session token management
//!
//! This module handles:
//! - Issuing HS256-signed access and refresh tokens
//! - Full verification (structure, signature, claims, revocation, expiry)
//! - Per-user mass revocation with first-revocation-wins semantics
//! - Request-level subject and admin queries over an Authorization header

mod clock;
mod codec;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::TokenAuthorityConfig;
pub use service::TokenAuthority;
