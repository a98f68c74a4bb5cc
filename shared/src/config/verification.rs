//! Verification policy configuration module

use serde::{Deserialize, Serialize};

/// Code lifetime, attempt budget and identity policy for email verification
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Minutes a code stays redeemable after issuance
    #[serde(default = "default_code_expiration_minutes")]
    pub code_expiration_minutes: i64,

    /// Failed redemptions allowed before the code is burned
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Upper bound on how long issuance waits for the email provider
    #[serde(default = "default_dispatch_timeout_secs")]
    pub dispatch_timeout_secs: u64,

    /// Email domain suffixes accepted for issuance
    #[serde(default = "default_allowed_suffixes")]
    pub allowed_suffixes: Vec<String>,

    /// Additionally accept `.com` addresses
    #[serde(default)]
    pub test_mode: bool,

    /// Identities accepted regardless of suffix
    #[serde(default)]
    pub bypass_identities: Vec<String>,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: default_code_expiration_minutes(),
            max_attempts: default_max_attempts(),
            dispatch_timeout_secs: default_dispatch_timeout_secs(),
            allowed_suffixes: default_allowed_suffixes(),
            test_mode: false,
            bypass_identities: vec![],
        }
    }
}

impl VerificationConfig {
    /// Suffixes in effect, including the test-mode relaxation
    pub fn effective_suffixes(&self) -> Vec<String> {
        let mut suffixes: Vec<String> = self
            .allowed_suffixes
            .iter()
            .map(|s| s.trim().to_ascii_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        if self.test_mode && !suffixes.iter().any(|s| s == ".com") {
            suffixes.push(".com".to_string());
        }
        suffixes
    }
}

fn default_code_expiration_minutes() -> i64 {
    15
}

fn default_max_attempts() -> u32 {
    3
}

fn default_dispatch_timeout_secs() -> u64 {
    10
}

fn default_allowed_suffixes() -> Vec<String> {
    vec![".gov".to_string()]
}
