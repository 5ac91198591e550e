use actix_web::{web, HttpResponse};
use cadence_shared::ApiResponse;
use serde::Deserialize;

use crate::handlers::error::handle_domain_error;
use crate::Authority;

/// Body of `POST /api/v1/auth/refresh`
#[derive(Debug, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges a valid refresh token for a new access/refresh pair.
///
/// # Request Body
///
/// ```json
/// {
///     "refresh_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "data": {
///         "access_token": "...",
///         "refresh_token": "...",
///         "token_type": "Bearer",
///         "access_expires_in": 3600,
///         "refresh_expires_in": 86400
///     },
///     "timestamp": "..."
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Body is not valid JSON
/// - 401 Unauthorized: Refresh token malformed, forged, expired, revoked or an access token
/// - 503 Service Unavailable: Revocation store unreachable
pub async fn refresh(
    authority: web::Data<Authority>,
    body: web::Json<RefreshTokenRequest>,
) -> HttpResponse {
    match authority.refresh(&body.refresh_token, authority.now()).await {
        Ok(pair) => HttpResponse::Ok().json(ApiResponse::success(pair)),
        Err(error) => handle_domain_error(&error),
    }
}
