//! Token authority implementation

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::revocation::RevocationRecord;
use crate::domain::entities::token::{
    extract_claim, ClaimField, Claims, Role, TokenPair, TokenPayload, TokenType,
};
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::RevocationRepository;

use super::clock::{Clock, SystemClock};
use super::codec;
use super::config::TokenAuthorityConfig;

/// Issues, verifies and revokes session tokens
///
/// Every trust decision goes through [`TokenAuthority::verify`]; there is no
/// path that reads claims out of a token without checking its signature,
/// revocation state and expiry first.
pub struct TokenAuthority<R: RevocationRepository> {
    repository: R,
    config: TokenAuthorityConfig,
    clock: Arc<dyn Clock>,
}

impl<R: RevocationRepository> TokenAuthority<R> {
    /// Creates a new token authority using the system clock
    ///
    /// # Arguments
    ///
    /// * `repository` - Revocation record storage
    /// * `config` - Signing secret and storage timeout
    pub fn new(repository: R, config: TokenAuthorityConfig) -> Self {
        Self::with_clock(repository, config, Arc::new(SystemClock))
    }

    /// Creates a new token authority with an explicit time source
    pub fn with_clock(repository: R, config: TokenAuthorityConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            config,
            clock,
        }
    }

    /// Current time according to the authority's clock
    pub fn now(&self) -> i64 {
        self.clock.now()
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Issues a signed token for a subject
    ///
    /// # Arguments
    ///
    /// * `subject` - User email
    /// * `role` - User role carried in the token
    /// * `token_type` - Access or refresh; decides the lifetime
    /// * `now` - Issue time, seconds since epoch
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The compact token
    /// * `Err(DomainError::Validation)` - Empty subject, or an expiry past `i64::MAX`
    /// * `Err(TokenError::SigningError)` - No usable key material
    pub fn issue(
        &self,
        subject: &str,
        role: Role,
        token_type: TokenType,
        now: i64,
    ) -> DomainResult<String> {
        if subject.is_empty() {
            return Err(DomainError::Validation {
                message: "Token subject must not be empty".to_string(),
            });
        }

        let payload = TokenPayload::new(subject, role, token_type, now).ok_or_else(|| {
            DomainError::Validation {
                message: "Issue time out of range".to_string(),
            }
        })?;
        let token = codec::encode(&payload, &self.config.secret).map_err(|err| {
            warn!(email = %subject, error_code = err.code(), "Token issuance failed");
            err
        })?;

        debug!(email = %subject, token_type = %token_type, exp = payload.exp, "Token issued");
        Ok(token)
    }

    /// Issues an access and a refresh token together
    pub fn issue_pair(&self, subject: &str, role: Role, now: i64) -> DomainResult<TokenPair> {
        let access_token = self.issue(subject, role, TokenType::Access, now)?;
        let refresh_token = self.issue(subject, role, TokenType::Refresh, now)?;

        Ok(TokenPair::new(access_token, refresh_token))
    }

    /// Fully verifies a token and returns its claims
    ///
    /// Checks run in order: structure, signature, claims decode, revocation,
    /// expiry. The first failing check decides the error.
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Every check passed
    /// * `Err(TokenError::MalformedToken)` - Not three base64url segments, or bad JSON
    /// * `Err(TokenError::InvalidSignature)` - Recomputed MAC does not match
    /// * `Err(TokenError::TokenRevoked)` - Issued at or before the subject's revocation
    /// * `Err(TokenError::TokenExpired)` - `now >= exp`
    /// * `Err(TokenError::StorageUnavailable)` - Revocation state could not be read
    pub async fn verify(&self, token: &str, now: i64) -> DomainResult<Claims> {
        let result = self.verify_inner(token, now).await;

        if let Err(err) = &result {
            if err.is_rejection() {
                debug!(error_code = err.code(), "Token rejected");
            } else {
                warn!(error_code = err.code(), "Token verification could not complete");
            }
        }

        result.map_err(DomainError::from)
    }

    async fn verify_inner(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        let decoded = codec::decode(token)?;

        codec::verify_signature(&decoded, &self.config.secret)?;

        let payload: TokenPayload =
            serde_json::from_slice(&decoded.payload).map_err(|_| TokenError::MalformedToken)?;

        let record = self
            .storage_call("get", self.repository.get(&payload.email))
            .await?;
        if let Some(record) = record {
            if record.revokes(payload.iat) {
                return Err(TokenError::TokenRevoked);
            }
        }

        if payload.is_expired_at(now) {
            return Err(TokenError::TokenExpired);
        }

        Ok(Claims::from(payload))
    }

    /// Verifies a token and requires it to be an access token
    pub async fn verify_access(&self, token: &str, now: i64) -> DomainResult<Claims> {
        self.verify_typed(token, TokenType::Access, now).await
    }

    /// Verifies a token and requires it to be a refresh token
    pub async fn verify_refresh(&self, token: &str, now: i64) -> DomainResult<Claims> {
        self.verify_typed(token, TokenType::Refresh, now).await
    }

    async fn verify_typed(&self, token: &str, expected: TokenType, now: i64) -> DomainResult<Claims> {
        let claims = self.verify(token, now).await?;

        if claims.token_type != expected {
            debug!(email = %claims.subject, expected = %expected, "Token type mismatch");
            return Err(TokenError::TokenTypeMismatch {
                expected: expected.to_string(),
            }
            .into());
        }

        Ok(claims)
    }

    /// Reads one payload field of a token after full verification
    ///
    /// Returns `""` when the verified payload lacks the field.
    pub async fn verified_claim(&self, token: &str, field: ClaimField, now: i64) -> DomainResult<String> {
        self.verify(token, now).await?;

        let decoded = codec::decode(token)?;
        let json = String::from_utf8(decoded.payload).map_err(|_| TokenError::MalformedToken)?;

        Ok(extract_claim(&json, field))
    }

    /// Revokes every token of a subject issued at or before `now`
    ///
    /// First revocation wins: if the subject already has a record, nothing
    /// changes and `TokenError::AlreadyRevoked` carries the existing cut-off.
    /// Concurrent calls are settled by the repository's atomic insert.
    ///
    /// # Returns
    ///
    /// * `Ok(RevocationRecord)` - The newly created record
    /// * `Err(TokenError::AlreadyRevoked)` - A record already existed
    /// * `Err(TokenError::StorageUnavailable)` - Store unreachable or timed out
    pub async fn revoke_all(&self, subject: &str, now: i64) -> DomainResult<RevocationRecord> {
        if subject.is_empty() {
            return Err(DomainError::Validation {
                message: "Revocation subject must not be empty".to_string(),
            });
        }

        if self.storage_call("exists", self.repository.exists(subject)).await? {
            return Err(self.already_revoked(subject).await.into());
        }

        let record = RevocationRecord::new(subject, now);
        let inserted = self
            .storage_call("put_if_absent", self.repository.put_if_absent(record.clone()))
            .await?;

        if !inserted {
            debug!(email = %subject, "Lost revocation race");
            return Err(self.already_revoked(subject).await.into());
        }

        info!(email = %subject, invalidated_before = now, "All sessions revoked");
        Ok(record)
    }

    async fn already_revoked(&self, subject: &str) -> TokenError {
        match self.storage_call("get", self.repository.get(subject)).await {
            Ok(Some(existing)) => {
                debug!(
                    email = %subject,
                    invalidated_before = existing.invalidated_before,
                    "Sessions already revoked"
                );
                TokenError::AlreadyRevoked {
                    invalidated_before: existing.invalidated_before,
                }
            }
            Ok(None) => {
                warn!(email = %subject, "Revocation record vanished after existence check");
                TokenError::StorageUnavailable
            }
            Err(err) => err,
        }
    }

    /// Exchanges a valid refresh token for a new token pair
    pub async fn refresh(&self, refresh_token: &str, now: i64) -> DomainResult<TokenPair> {
        let claims = self.verify_refresh(refresh_token, now).await?;
        let pair = self.issue_pair(&claims.subject, claims.role, now)?;

        info!(email = %claims.subject, "Token pair refreshed");
        Ok(pair)
    }

    /// Returns the token of a `Bearer <token>` header value
    pub fn bearer_token(authorization: &str) -> Option<&str> {
        authorization
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }

    /// Subject of the access token carried by an Authorization header value
    ///
    /// The token is fully verified at the authority's current time.
    pub async fn subject_from_authorization(&self, authorization: Option<&str>) -> DomainResult<String> {
        let token = authorization
            .and_then(Self::bearer_token)
            .ok_or(AuthError::MissingCredentials)?;

        let claims = self.verify_access(token, self.now()).await?;
        Ok(claims.subject)
    }

    /// Whether an Authorization header value carries a verified admin access token
    ///
    /// Any failure, including an unreachable revocation store, answers `false`.
    pub async fn is_admin_authorization(&self, authorization: Option<&str>) -> bool {
        let Some(token) = authorization.and_then(Self::bearer_token) else {
            return false;
        };

        match self.verify_access(token, self.now()).await {
            Ok(claims) => claims.is_admin(),
            Err(_) => false,
        }
    }

    /// Runs a repository call under the storage timeout
    async fn storage_call<T, F>(&self, operation: &'static str, call: F) -> Result<T, TokenError>
    where
        F: Future<Output = Result<T, DomainError>>,
    {
        match tokio::time::timeout(self.config.storage_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => {
                warn!(operation, error = %err, "Revocation store call failed");
                Err(TokenError::StorageUnavailable)
            }
            Err(_) => {
                warn!(
                    operation,
                    timeout_ms = self.config.storage_timeout.as_millis() as u64,
                    "Revocation store call timed out"
                );
                Err(TokenError::StorageUnavailable)
            }
        }
    }
}
