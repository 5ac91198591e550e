use actix_web::{web, HttpResponse};
use cadence_core::{DomainError, TokenError};
use cadence_shared::ApiResponse;
use serde::Serialize;

use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;
use crate::Authority;

/// Outcome of a revoke-all request
#[derive(Debug, Serialize)]
pub struct RevocationResponse {
    pub email: String,
    /// Tokens issued at or before this instant are rejected
    pub invalidated_before: i64,
    /// The cut-off was set by an earlier request and left unchanged
    pub already_revoked: bool,
}

/// Handler for POST /api/v1/auth/logout-all
///
/// Revokes every token of the caller issued up to now, including the one
/// used for this request. Requires authentication via Bearer token.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "data": { "email": "...", "invalidated_before": 1700000000, "already_revoked": false },
///     "message": "All sessions revoked",
///     "timestamp": "..."
/// }
/// ```
///
/// A repeat request keeps the first cut-off and answers with
/// `already_revoked: true`.
///
/// ## Errors
/// - 401 Unauthorized: Missing or rejected access token
/// - 503 Service Unavailable: Revocation store unreachable
pub async fn logout_all(authority: web::Data<Authority>, auth: AuthContext) -> HttpResponse {
    match authority.revoke_all(&auth.email, authority.now()).await {
        Ok(record) => HttpResponse::Ok().json(
            ApiResponse::success(RevocationResponse {
                email: record.email,
                invalidated_before: record.invalidated_before,
                already_revoked: false,
            })
            .with_message("All sessions revoked"),
        ),
        Err(DomainError::Token(TokenError::AlreadyRevoked { invalidated_before })) => {
            HttpResponse::Ok().json(
                ApiResponse::success(RevocationResponse {
                    email: auth.email,
                    invalidated_before,
                    already_revoked: true,
                })
                .with_message("Sessions were already revoked"),
            )
        }
        Err(error) => handle_domain_error(&error),
    }
}
