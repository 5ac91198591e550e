use std::collections::HashMap;
use std::time::{Duration, Instant};

use actix_web::{http::StatusCode, web, HttpResponse};
use cadence_core::RevocationRepository;
use cadence_shared::{HealthResponse, HealthStatus, ServiceHealth};
use tracing::warn;

use crate::Authority;

const REVOCATION_STORE: &str = "revocation_store";
const CHECK_TIMEOUT: Duration = Duration::from_secs(2);

/// Handler for GET /health
///
/// Answers 503 when the revocation store does not respond, since no token
/// can be verified without it.
pub async fn health_check(authority: web::Data<Authority>) -> HttpResponse {
    let started = Instant::now();

    let store = match tokio::time::timeout(CHECK_TIMEOUT, authority.repository().health_check()).await
    {
        Ok(Ok(())) => ServiceHealth::healthy(started.elapsed().as_millis() as u64),
        Ok(Err(err)) => {
            warn!(error = %err, "Revocation store health check failed");
            ServiceHealth::unhealthy("Revocation store check failed")
        }
        Err(_) => {
            warn!(timeout_ms = CHECK_TIMEOUT.as_millis() as u64, "Revocation store health check timed out");
            ServiceHealth::unhealthy("Revocation store check timed out")
        }
    };

    let mut services = HashMap::new();
    services.insert(REVOCATION_STORE.to_string(), store);

    let response = HealthResponse::from_services(services, env!("CARGO_PKG_VERSION"));
    let status = match response.status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    HttpResponse::build(status).json(response)
}
