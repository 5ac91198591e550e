//! Mapping of domain errors onto HTTP responses
//!
//! Every failure leaves the API as an `ApiResponse` envelope with
//! `success: false`, a stable error code and a message that never carries
//! token contents or key material.

use std::fmt;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use cadence_core::{AuthError, DomainError, TokenError};
use cadence_shared::{error_codes, ApiResponse};

const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// HTTP status for a domain error
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Token(TokenError::StorageUnavailable) => StatusCode::SERVICE_UNAVAILABLE,
        DomainError::Token(TokenError::SigningError) => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::Token(TokenError::AlreadyRevoked { .. }) => StatusCode::CONFLICT,
        DomainError::Token(_) => StatusCode::UNAUTHORIZED,
        DomainError::Auth(_) => StatusCode::UNAUTHORIZED,
        DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
        DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Stable machine-readable code for a domain error
pub fn error_code(error: &DomainError) -> &'static str {
    match error {
        DomainError::Token(err) => err.code(),
        DomainError::Auth(err) => err.code(),
        DomainError::Validation { .. } => error_codes::VALIDATION_ERROR,
        DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
    }
}

fn client_message(error: &DomainError) -> String {
    match error {
        DomainError::Internal { .. } | DomainError::Token(TokenError::SigningError) => {
            INTERNAL_MESSAGE.to_string()
        }
        DomainError::Validation { message } => message.clone(),
        other => other.to_string(),
    }
}

/// Converts a domain error into its JSON error response
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let status = status_for(error);
    let code = error_code(error);

    if status.is_server_error() {
        tracing::error!(code, error = %error, "Request failed");
    } else {
        tracing::debug!(code, "Request rejected");
    }

    HttpResponse::build(status).json(ApiResponse::<()>::error(code, client_message(error)))
}

/// Domain error usable as an actix-web error
///
/// Lets extractors and handlers return `Result<_, ApiError>` and still
/// produce the same envelope as [`handle_domain_error`].
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        status_for(&self.0)
    }

    fn error_response(&self) -> HttpResponse {
        handle_domain_error(&self.0)
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self(error)
    }
}

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        Self(error.into())
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        Self(error.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_rejections_map_to_unauthorized() {
        for err in [
            TokenError::MalformedToken,
            TokenError::InvalidSignature,
            TokenError::TokenExpired,
            TokenError::TokenRevoked,
            TokenError::TokenTypeMismatch { expected: "access".to_string() },
        ] {
            assert_eq!(status_for(&err.into()), StatusCode::UNAUTHORIZED);
        }

        assert_eq!(
            status_for(&AuthError::InsufficientPermissions.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(status_for(&AuthError::MissingCredentials.into()), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_operational_failures() {
        assert_eq!(
            status_for(&TokenError::StorageUnavailable.into()),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_for(&TokenError::SigningError.into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(&DomainError::Validation { message: "bad".to_string() }),
            StatusCode::BAD_REQUEST
        );
    }

    #[actix_web::test]
    async fn test_internal_details_are_not_exposed() {
        let error = DomainError::Internal {
            message: "connection refused at 10.0.0.3:3306".to_string(),
        };
        let response = handle_domain_error(&error);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], error_codes::INTERNAL_ERROR);
        assert_eq!(json["message"], INTERNAL_MESSAGE);
    }

    #[actix_web::test]
    async fn test_token_error_body_carries_code() {
        let response = handle_domain_error(&TokenError::TokenRevoked.into());
        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["error"], "TOKEN_REVOKED");
        assert_eq!(json["message"], "Token revoked");
    }
}
