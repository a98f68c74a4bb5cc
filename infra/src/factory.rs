//! Builds the verification service from application configuration
//!
//! The record store and the email provider are chosen at runtime, so the
//! service is assembled over trait objects.

use std::sync::Arc;

use rfs_core::repositories::VerificationRecordRepository;
use rfs_core::services::verification::{
    EmailServiceTrait, VerificationService, VerificationServiceConfig,
};
use rfs_shared::config::{AppConfig, CacheConfig, EmailConfig, EmailProvider, StoreBackend};

use crate::cache::{InMemoryVerificationStore, RedisClient, RedisVerificationStore};
use crate::email::{MockEmailService, ResendEmailService};
use crate::InfrastructureError;

/// Verification service with backends selected from configuration
pub type DynVerificationService =
    VerificationService<dyn VerificationRecordRepository, dyn EmailServiceTrait>;

/// Create the record store selected by `cache.backend`
///
/// # Arguments
///
/// * `config` - Record store configuration
/// * `ttl_seconds` - Key TTL for the Redis store, see [`CacheConfig::record_ttl_secs`]
pub async fn create_record_store(
    config: &CacheConfig,
    ttl_seconds: u64,
) -> Result<Arc<dyn VerificationRecordRepository>, InfrastructureError> {
    match config.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory verification store; records are not shared between instances");
            Ok(Arc::new(InMemoryVerificationStore::new()))
        }
        StoreBackend::Redis => {
            let client = RedisClient::new(config).await?;
            Ok(Arc::new(RedisVerificationStore::new(
                client,
                config.key_prefix.clone(),
                ttl_seconds,
            )))
        }
    }
}

/// Create the email service selected by `email.provider`
///
/// Outside production a Resend provider without an API key falls back to the
/// mock service; in production it is a configuration error.
pub fn create_email_service(
    config: &EmailConfig,
    allow_mock_fallback: bool,
) -> Result<Arc<dyn EmailServiceTrait>, InfrastructureError> {
    match config.provider {
        EmailProvider::Mock => Ok(Arc::new(MockEmailService::new())),
        EmailProvider::Resend => match ResendEmailService::new(config) {
            Ok(service) => Ok(Arc::new(service)),
            Err(e) if allow_mock_fallback => {
                tracing::error!("Failed to initialize Resend email service: {}", e);
                tracing::warn!("Falling back to mock email service");
                Ok(Arc::new(MockEmailService::new()))
            }
            Err(e) => Err(e),
        },
    }
}

/// Assemble the verification service from the full application config
pub async fn build_verification_service(
    config: &AppConfig,
) -> Result<DynVerificationService, InfrastructureError> {
    let service_config = VerificationServiceConfig::from(&config.verification);
    let window_secs = service_config.expiry_window().num_seconds().max(0) as u64;
    let ttl_seconds = config.cache.record_ttl_secs(window_secs);

    let repository = create_record_store(&config.cache, ttl_seconds).await?;
    let email_service =
        create_email_service(&config.email, !config.environment.is_production())?;

    tracing::info!(
        backend = ?config.cache.backend,
        provider = ?config.email.provider,
        suffixes = ?service_config.allowed_suffixes,
        "Verification service initialized"
    );

    Ok(VerificationService::new(
        repository,
        email_service,
        service_config,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rfs_core::services::verification::{IssueOutcome, RedeemOutcome};
    use rfs_shared::Environment;

    #[test]
    fn test_resend_without_key_in_production_fails() {
        let result = create_email_service(&EmailConfig::default(), false);
        assert!(matches!(result, Err(InfrastructureError::Config(_))));
    }

    #[test]
    fn test_resend_without_key_falls_back_outside_production() {
        assert!(create_email_service(&EmailConfig::default(), true).is_ok());
    }

    #[tokio::test]
    async fn test_build_development_service() {
        let config = AppConfig::development();
        assert_eq!(config.environment, Environment::Development);

        let service = build_verification_service(&config).await.unwrap();

        // Development runs in test mode, so `.com` is accepted
        let outcome = service.request_code("dev@example.com").await.unwrap();
        assert_eq!(outcome, IssueOutcome::Accepted);

        let outcome = service.redeem("dev@example.com", "not-a-code").await.unwrap();
        assert_eq!(outcome.reason(), RedeemOutcome::InvalidCode { remaining_attempts: 2 }.reason());
    }
}
