//! Record store configuration module

use serde::{Deserialize, Serialize};

/// Which backend holds verification records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Redis keyspace, shared between server instances
    #[default]
    Redis,
    /// Process-local map, for development and tests
    Memory,
}

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Store backend selection
    #[serde(default)]
    pub backend: StoreBackend,

    /// Redis connection URL
    #[serde(default = "default_url")]
    pub url: String,

    /// Key prefix for verification records
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,

    /// Seconds a record key outlives its expiry window
    ///
    /// Redemptions arriving during the grace period still find the record and
    /// are reported as expired; the TTL only reclaims abandoned keys.
    #[serde(default = "default_ttl_grace_secs")]
    pub ttl_grace_secs: u64,

    /// Maximum number of retry attempts when connecting
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay between retries in milliseconds (exponential backoff)
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Redis,
            url: default_url(),
            key_prefix: default_key_prefix(),
            ttl_grace_secs: default_ttl_grace_secs(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl CacheConfig {
    /// Create a Redis configuration with the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// In-memory store configuration
    pub fn memory() -> Self {
        Self {
            backend: StoreBackend::Memory,
            ..Default::default()
        }
    }

    /// Set key prefix
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Key TTL for records redeemable for `expiry_window_secs`
    pub fn record_ttl_secs(&self, expiry_window_secs: u64) -> u64 {
        expiry_window_secs.saturating_add(self.ttl_grace_secs).max(1)
    }

    /// Get Redis URL
    pub fn redis_url(&self) -> &str {
        &self.url
    }
}

fn default_url() -> String {
    String::from("redis://localhost:6379")
}

fn default_key_prefix() -> String {
    String::from("verification-codes")
}

fn default_ttl_grace_secs() -> u64 {
    86400 // 24 hours
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    100
}
