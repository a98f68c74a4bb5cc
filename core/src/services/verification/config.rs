//! Configuration for the verification service

use std::time::Duration;

use rfs_shared::VerificationConfig;

use crate::domain::entities::{DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS};

use super::policy::DomainPolicy;

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Number of minutes before a verification code expires
    pub code_expiration_minutes: i64,
    /// Maximum number of redemption attempts per code
    pub max_attempts: u32,
    /// How long issuance waits for the email provider
    pub dispatch_timeout: Duration,
    /// Domain suffixes accepted for issuance (lowercase, with leading dot)
    pub allowed_suffixes: Vec<String>,
    /// Identities accepted regardless of suffix
    pub bypass_identities: Vec<String>,
}

impl VerificationServiceConfig {
    /// Expiry window as a chrono duration
    pub fn expiry_window(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.code_expiration_minutes)
    }

    /// Builds the identity policy for this configuration
    pub fn policy(&self) -> DomainPolicy {
        DomainPolicy::new(&self.allowed_suffixes[..], &self.bypass_identities[..])
    }
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            max_attempts: MAX_ATTEMPTS,
            dispatch_timeout: Duration::from_secs(10),
            allowed_suffixes: vec![".gov".to_string()],
            bypass_identities: vec![],
        }
    }
}

impl From<&VerificationConfig> for VerificationServiceConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            code_expiration_minutes: config.code_expiration_minutes,
            max_attempts: config.max_attempts,
            dispatch_timeout: Duration::from_secs(config.dispatch_timeout_secs),
            allowed_suffixes: config.effective_suffixes(),
            bypass_identities: config.bypass_identities.clone(),
        }
    }
}
