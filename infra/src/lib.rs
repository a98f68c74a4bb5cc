//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the RFS Government
//! verification service. It provides concrete implementations of the core
//! traits for persistence and outbound email.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Cache**: Redis client, Redis-backed verification record store and an
//!   in-memory store for development and tests
//! - **Email**: Resend HTTP API sender and a mock sender
//! - **Factory**: builds the verification service from `AppConfig`
//!
//! ## Features
//!
//! - `redis-cache`: Enable Redis record store support (default)

use rfs_core::errors::DomainError;

/// Cache module - Redis client and record stores
pub mod cache;

/// Email module - outbound email providers
pub mod email;

/// Service construction from configuration
pub mod factory;

pub use factory::{build_verification_service, DynVerificationService};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Stored or received data could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email provider error
    #[error("Email service error: {0}")]
    Email(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Cache(_) | InfrastructureError::Serialization(_) => {
                DomainError::store(err.to_string())
            }
            InfrastructureError::Http(_) | InfrastructureError::Email(_) => {
                DomainError::dispatch(err.to_string())
            }
            InfrastructureError::Config(message) => DomainError::Internal { message },
        }
    }
}
