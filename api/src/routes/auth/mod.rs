//! Authentication route handlers
//!
//! - Token refresh
//! - Revocation of every session of the caller
//! - Identity of the caller

use actix_web::web;

use crate::middleware::auth::JwtAuth;

pub mod logout;
pub mod me;
pub mod refresh;

/// Registers the `/auth` scope
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/refresh", web::post().to(refresh::refresh))
            .service(
                web::resource("/logout-all")
                    .wrap(JwtAuth::new())
                    .route(web::post().to(logout::logout_all)),
            )
            .service(
                web::resource("/me")
                    .wrap(JwtAuth::new())
                    .route(web::get().to(me::me)),
            ),
    );
}
