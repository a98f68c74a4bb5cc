//! Configuration module with business-specific sub-modules
//!
//! - `cache` - record store backend and Redis connection settings
//! - `email` - outbound email provider settings
//! - `environment` - environment detection
//! - `server` - HTTP server and CORS settings
//! - `verification` - code lifetime, attempt budget and domain policy
//!
//! [`AppConfig::load`] layers `config/default.toml`, `config/{environment}.toml`
//! and `RFS__*` environment variables on top of the built-in defaults.

pub mod cache;
pub mod email;
pub mod environment;
pub mod server;
pub mod verification;

use serde::{Deserialize, Serialize};

pub use cache::{CacheConfig, StoreBackend};
pub use email::{EmailConfig, EmailProvider};
pub use environment::Environment;
pub use server::{CorsConfig, ServerConfig};
pub use verification::VerificationConfig;

/// Error raised while assembling the application configuration
pub type ConfigError = ::config::ConfigError;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Record store configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Outbound email configuration
    #[serde(default)]
    pub email: EmailConfig,

    /// Verification policy configuration
    #[serde(default)]
    pub verification: VerificationConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::new("127.0.0.1", 8080),
            cache: CacheConfig::memory(),
            email: EmailConfig::mock(),
            verification: VerificationConfig {
                test_mode: true,
                ..Default::default()
            },
            cors: CorsConfig::development(),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig::new("0.0.0.0", 8080),
            cache: CacheConfig::default(),
            email: EmailConfig::default(),
            verification: VerificationConfig::default(),
            cors: CorsConfig::default(),
        }
    }

    /// Defaults for the given environment, before any file or variable overrides
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => {
                let mut config = Self::production();
                config.environment = Environment::Staging;
                config.verification.test_mode = true;
                config
            }
        }
    }

    /// Load configuration from defaults, optional TOML files and environment variables
    ///
    /// Variables use the `RFS` prefix and `__` as the section separator, e.g.
    /// `RFS__EMAIL__API_KEY` or `RFS__VERIFICATION__MAX_ATTEMPTS`.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let env = Environment::from_env();
        let defaults = ::config::Config::try_from(&Self::for_environment(env))?;

        ::config::Config::builder()
            .add_source(defaults)
            .add_source(::config::File::with_name("config/default").required(false))
            .add_source(::config::File::with_name(env.config_file()).required(false))
            .add_source(
                ::config::Environment::with_prefix("RFS")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("verification.allowed_suffixes")
                    .with_list_parse_key("verification.bypass_identities")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_defaults() {
        let config = AppConfig::development();
        assert_eq!(config.cache.backend, StoreBackend::Memory);
        assert_eq!(config.email.provider, EmailProvider::Mock);
        assert!(config.verification.test_mode);
    }

    #[test]
    fn test_production_defaults() {
        let config = AppConfig::production();
        assert_eq!(config.cache.backend, StoreBackend::Redis);
        assert_eq!(config.email.provider, EmailProvider::Resend);
        assert!(!config.verification.test_mode);
        assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_staging_enables_test_mode() {
        let config = AppConfig::for_environment(Environment::Staging);
        assert_eq!(config.environment, Environment::Staging);
        assert!(config.verification.test_mode);
    }

    #[test]
    fn test_round_trips_through_config_builder() {
        let source = ::config::Config::try_from(&AppConfig::development()).unwrap();
        let loaded: AppConfig = ::config::Config::builder()
            .add_source(source)
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(loaded.verification.max_attempts, 3);
        assert_eq!(loaded.verification.code_expiration_minutes, 15);
    }
}
