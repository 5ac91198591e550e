//! HTTP edge of the Cadence session token authority
//!
//! Bearer token extraction, the `JwtAuth` middleware, request extractors and
//! the authentication endpoints.

use cadence_core::TokenAuthority;
use cadence_infra::SharedRevocationRepository;

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod telemetry;

/// Token authority as shared with request handlers through `web::Data`
pub type Authority = TokenAuthority<SharedRevocationRepository>;
