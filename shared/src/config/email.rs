//! Outbound email configuration module

use serde::{Deserialize, Serialize};

/// Email delivery provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Resend HTTP API
    #[default]
    Resend,
    /// Log-only sender for development
    Mock,
}

/// Email service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Provider selection
    #[serde(default)]
    pub provider: EmailProvider,

    /// Provider API key (required for Resend)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Provider API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Sender address
    #[serde(default = "default_from_address")]
    pub from_address: String,

    /// Sender display name
    #[serde(default = "default_from_name")]
    pub from_name: Option<String>,

    /// Maximum send attempts for retryable provider failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial retry delay in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Per-request HTTP timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::Resend,
            api_key: None,
            api_base_url: default_api_base_url(),
            from_address: default_from_address(),
            from_name: default_from_name(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl EmailConfig {
    /// Mock provider configuration
    pub fn mock() -> Self {
        Self {
            provider: EmailProvider::Mock,
            ..Default::default()
        }
    }

    /// Formatted `From` header value
    pub fn from_header(&self) -> String {
        match &self.from_name {
            Some(name) => format!("{} <{}>", name, self.from_address),
            None => self.from_address.clone(),
        }
    }
}

fn default_api_base_url() -> String {
    String::from("https://api.resend.com")
}

fn default_from_address() -> String {
    String::from("rfsgovernment@rfsgovernment.com")
}

fn default_from_name() -> Option<String> {
    Some(String::from("RFS Government"))
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    500
}

fn default_request_timeout_secs() -> u64 {
    10
}
