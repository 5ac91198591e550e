//! Token entities for session authentication.
//!
//! A session token is three base64url segments: the fixed [`TokenHeader`],
//! the [`TokenPayload`] and an HS256 signature over the first two.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Access token lifetime (1 hour)
pub const ACCESS_TOKEN_LIFETIME_SECONDS: i64 = 60 * 60;

/// Refresh token lifetime (24 hours)
pub const REFRESH_TOKEN_LIFETIME_SECONDS: i64 = 24 * 60 * 60;

/// Signing algorithm written into every header
pub const TOKEN_ALGORITHM: &str = "HS256";

/// Token media type written into every header
pub const TOKEN_TYPE_JWT: &str = "JWT";

/// User role carried in the token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "USER" => Ok(Role::User),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// Kind of session token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }

    /// Seconds between `iat` and `exp` for this kind of token
    pub fn lifetime_seconds(&self) -> i64 {
        match self {
            TokenType::Access => ACCESS_TOKEN_LIFETIME_SECONDS,
            TokenType::Refresh => REFRESH_TOKEN_LIFETIME_SECONDS,
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token header. Field order is the wire order: `{"alg":"HS256","typ":"JWT"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    pub alg: String,
    pub typ: String,
}

impl TokenHeader {
    pub fn hs256() -> Self {
        Self {
            alg: TOKEN_ALGORITHM.to_string(),
            typ: TOKEN_TYPE_JWT.to_string(),
        }
    }

    pub fn is_hs256(&self) -> bool {
        self.alg == TOKEN_ALGORITHM && self.typ == TOKEN_TYPE_JWT
    }
}

/// Token payload as carried on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    /// Subject (user email)
    pub email: String,

    /// User role
    pub role: Role,

    /// Access or refresh
    #[serde(rename = "type")]
    pub token_type: TokenType,

    /// Issued at, seconds since epoch
    pub iat: i64,

    /// Expiration, seconds since epoch
    pub exp: i64,
}

impl TokenPayload {
    /// Creates a payload issued at `now`, expiring after the lifetime of `token_type`
    ///
    /// `None` when the expiry does not fit in an `i64`.
    pub fn new(
        email: impl Into<String>,
        role: Role,
        token_type: TokenType,
        now: i64,
    ) -> Option<Self> {
        let exp = now.checked_add(token_type.lifetime_seconds())?;

        Some(Self {
            email: email.into(),
            role,
            token_type,
            iat: now,
            exp,
        })
    }

    /// `now >= exp`; the expiry instant itself is no longer valid
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }
}

/// Verified claims handed to callers once every check has passed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Claims {
    pub subject: String,
    pub role: Role,
    pub token_type: TokenType,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<TokenPayload> for Claims {
    fn from(payload: TokenPayload) -> Self {
        Self {
            subject: payload.email,
            role: payload.role,
            token_type: payload.token_type,
            issued_at: payload.iat,
            expires_at: payload.exp,
        }
    }
}

/// Named payload fields readable through [`extract_claim`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimField {
    Email,
    Role,
    Type,
    IssuedAt,
    ExpiresAt,
}

impl ClaimField {
    /// JSON key of the field in the payload
    pub fn key(&self) -> &'static str {
        match self {
            ClaimField::Email => "email",
            ClaimField::Role => "role",
            ClaimField::Type => "type",
            ClaimField::IssuedAt => "iat",
            ClaimField::ExpiresAt => "exp",
        }
    }
}

/// Reads a single field from a decoded payload.
///
/// Returns an empty string when the payload is not a JSON object or the
/// field is absent or null; callers must treat `""` as "claim missing".
/// This does no verification of its own and must only be fed payloads that
/// came out of a verified token.
pub fn extract_claim(payload: &str, field: ClaimField) -> String {
    let value: serde_json::Value = match serde_json::from_str(payload) {
        Ok(value) => value,
        Err(_) => return String::new(),
    };

    match value.get(field.key()) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Access and refresh token issued together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Access token for API calls
    pub access_token: String,

    /// Refresh token for obtaining a new pair
    pub refresh_token: String,

    /// Authorization scheme, always `Bearer`
    pub token_type: String,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,

    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    pub fn new(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            access_expires_in: ACCESS_TOKEN_LIFETIME_SECONDS,
            refresh_expires_in: REFRESH_TOKEN_LIFETIME_SECONDS,
        }
    }
}
