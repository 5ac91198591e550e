//! Domain entities representing core business objects.

pub mod revocation;
pub mod token;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use revocation::RevocationRecord;
pub use token::{
    extract_claim, ClaimField, Claims, Role, TokenHeader, TokenPair, TokenPayload, TokenType,
    ACCESS_TOKEN_LIFETIME_SECONDS, REFRESH_TOKEN_LIFETIME_SECONDS,
};
