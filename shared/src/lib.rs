//! Shared utilities and common types for the RFS Government server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and layered loading
//! - API response envelopes
//! - Email address helpers (normalisation, validation, masking)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, ConfigError, CorsConfig, EmailConfig, Environment, ServerConfig,
    StoreBackend, VerificationConfig,
};
pub use types::{error_codes, ApiResponse, ErrorResponse, ResponseStatus};
pub use utils::email;
