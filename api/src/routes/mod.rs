//! Route table

use actix_web::{error::InternalError, web, HttpResponse};
use cadence_shared::{error_codes, ApiResponse};

pub mod auth;
pub mod health;

/// Registers every endpoint of the service
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health::health_check))
        .service(web::scope("/api/v1").configure(auth::configure));
}

/// JSON body settings; malformed bodies get the standard error envelope
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(16 * 1024)
        .error_handler(|err, _req| {
            tracing::debug!(error = %err, "Rejected request body");
            let response = HttpResponse::BadRequest().json(ApiResponse::<()>::error(
                error_codes::BAD_REQUEST,
                "Request body is not valid JSON for this endpoint",
            ));
            InternalError::from_response(err, response).into()
        })
}

/// Fallback for unknown paths
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<()>::error(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
