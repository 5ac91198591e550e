//! Bearer token authentication for protected endpoints.
//!
//! [`JwtAuth`] verifies the access token of every request through the
//! shared [`Authority`] and injects an [`AuthContext`] into the request
//! extensions. Rejected requests never reach the wrapped service; they are
//! answered with the JSON error envelope.

use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use cadence_core::{AuthError, Claims, DomainError, DomainResult, Role};
use futures_util::future::LocalBoxFuture;
use serde::Serialize;
use tracing::debug;

use crate::handlers::error::{error_code, handle_domain_error, ApiError};
use crate::Authority;

/// Verified caller identity injected into requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthContext {
    /// Subject of the access token
    pub email: String,
    pub role: Role,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl AuthContext {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<Claims> for AuthContext {
    fn from(claims: Claims) -> Self {
        Self {
            email: claims.subject,
            role: claims.role,
            issued_at: claims.issued_at,
            expires_at: claims.expires_at,
        }
    }
}

/// JWT authentication middleware factory
///
/// Requires `web::Data<Authority>` in the application data.
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtAuth;

impl JwtAuth {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let http_req = req.request().clone();

        Box::pin(async move {
            let outcome = authenticate(&http_req).await;
            drop(http_req);

            match outcome {
                Ok(context) => {
                    req.extensions_mut().insert(context);
                    let response = service.call(req).await?;
                    Ok(response.map_into_left_body())
                }
                Err(err) => {
                    debug!(path = %req.path(), code = error_code(&err), "Authentication failed");
                    let response = handle_domain_error(&err);
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

/// Extracts the token of an `Authorization: Bearer <token>` header
pub fn extract_bearer_token(req: &HttpRequest) -> Option<String> {
    let header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    Authority::bearer_token(header).map(str::to_string)
}

fn authorization_header(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
}

fn authority_from(req: &HttpRequest) -> DomainResult<web::Data<Authority>> {
    req.app_data::<web::Data<Authority>>()
        .cloned()
        .ok_or_else(|| DomainError::Internal {
            message: "Token authority is not registered as app data".to_string(),
        })
}

/// Verifies the request's access token and builds its context
async fn authenticate(req: &HttpRequest) -> DomainResult<AuthContext> {
    let token = extract_bearer_token(req).ok_or(AuthError::MissingCredentials)?;
    let authority = authority_from(req)?;

    let claims = authority.verify_access(&token, authority.now()).await?;
    Ok(claims.into())
}

/// Subject of the request's verified access token
pub async fn extract_subject(req: &HttpRequest, authority: &Authority) -> DomainResult<String> {
    authority
        .subject_from_authorization(authorization_header(req))
        .await
}

/// Whether the request carries a verified admin access token
///
/// Fails closed: any verification or storage failure answers `false`.
pub async fn is_admin(req: &HttpRequest, authority: &Authority) -> bool {
    authority.is_admin_authorization(authorization_header(req)).await
}

/// Extractor for required authentication
///
/// Uses the context injected by [`JwtAuth`] when present, otherwise
/// verifies the request's Bearer token itself.
impl FromRequest for AuthContext {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let injected = req.extensions().get::<AuthContext>().cloned();
        if let Some(context) = injected {
            return Box::pin(ready(Ok(context)));
        }

        let req = req.clone();
        Box::pin(async move { authenticate(&req).await.map_err(ApiError::from) })
    }
}

/// Extractor for admin-only operations
///
/// Rejects with `AuthError::InsufficientPermissions` when the verified role
/// is not `ADMIN`.
#[derive(Debug, Clone)]
pub struct AdminContext(pub AuthContext);

impl FromRequest for AdminContext {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let context = AuthContext::from_request(req, payload);

        Box::pin(async move {
            let context = context.await?;
            if context.is_admin() {
                Ok(AdminContext(context))
            } else {
                debug!(email = %context.email, "Admin operation refused");
                Err(AuthError::InsufficientPermissions.into())
            }
        })
    }
}
