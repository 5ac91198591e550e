//! Server bootstrap: configuration checks, dependency wiring and the HTTP
//! server itself

use actix_web::{web, App, HttpServer};
use anyhow::{bail, Context};
use cadence_core::{TokenAuthority, TokenAuthorityConfig};
use cadence_infra::{build_revocation_repository, InfraConfig};
use cadence_shared::AppConfig;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

use crate::routes;
use crate::Authority;

/// Refuses configurations that would weaken token security outside development
pub fn validate_config(config: &AppConfig) -> anyhow::Result<()> {
    if config.jwt.is_using_default_secret() {
        if config.environment.is_development() {
            warn!("JWT_SECRET is not set; using the development secret");
        } else {
            bail!("JWT_SECRET must be set in the {} environment", config.environment);
        }
    }

    if config.jwt.secret.is_empty() {
        bail!("JWT_SECRET must not be empty");
    }

    if config.environment.is_production() && !config.revocation_backend.is_durable() {
        bail!(
            "Revocation backend '{}' loses revocations on restart and is not allowed in production",
            config.revocation_backend
        );
    }

    Ok(())
}

/// Builds the token authority on top of the configured revocation store
pub async fn build_authority(config: &AppConfig) -> anyhow::Result<Authority> {
    let infra = InfraConfig {
        backend: config.revocation_backend,
        database: config.database.clone(),
        cache: config.cache.clone(),
    };

    let repository = build_revocation_repository(&infra)
        .await
        .with_context(|| format!("failed to set up the {} revocation store", infra.backend))?;

    Ok(TokenAuthority::new(
        repository,
        TokenAuthorityConfig::from(&config.jwt),
    ))
}

/// Runs the HTTP server until shutdown
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    validate_config(&config)?;

    let authority = web::Data::new(build_authority(&config).await?);
    let bind_address = config.server.bind_address();

    info!(
        address = %bind_address,
        environment = %config.environment,
        backend = %config.revocation_backend,
        "Starting Cadence token authority"
    );

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(authority.clone())
            .configure(routes::configure)
            .default_service(web::route().to(routes::not_found))
    });

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("HTTP server terminated with an error")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_shared::{Environment, JwtConfig, RevocationBackend};

    fn config(environment: Environment, jwt: JwtConfig, backend: RevocationBackend) -> AppConfig {
        AppConfig {
            environment,
            jwt,
            revocation_backend: backend,
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_default_secret_allowed_only_in_development() {
        let dev = config(Environment::Development, JwtConfig::default(), RevocationBackend::Memory);
        assert!(validate_config(&dev).is_ok());

        let prod = config(Environment::Production, JwtConfig::default(), RevocationBackend::Mysql);
        assert!(validate_config(&prod).is_err());
    }

    #[test]
    fn test_production_requires_durable_backend() {
        let jwt = JwtConfig::new("a-production-secret-of-reasonable-length");

        let memory = config(Environment::Production, jwt.clone(), RevocationBackend::Memory);
        assert!(validate_config(&memory).is_err());

        let mysql = config(Environment::Production, jwt, RevocationBackend::Mysql);
        assert!(validate_config(&mysql).is_ok());
    }

    #[test]
    fn test_empty_secret_rejected() {
        let empty = config(Environment::Development, JwtConfig::new(""), RevocationBackend::Memory);
        assert!(validate_config(&empty).is_err());
    }

    #[tokio::test]
    async fn test_build_authority_with_memory_backend() {
        let dev = config(Environment::Development, JwtConfig::default(), RevocationBackend::Memory);
        let authority = build_authority(&dev).await.unwrap();

        let token = authority
            .issue("user@example.com", cadence_core::Role::User, cadence_core::TokenType::Access, 100)
            .unwrap();
        let claims = authority.verify_access(&token, 200).await.unwrap();
        assert_eq!(claims.subject, "user@example.com");
    }
}
