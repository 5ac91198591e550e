use actix_web::HttpResponse;
use cadence_shared::ApiResponse;

use crate::middleware::auth::AuthContext;

/// Handler for GET /api/v1/auth/me
///
/// Returns the verified identity of the caller's access token.
pub async fn me(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(auth))
}
