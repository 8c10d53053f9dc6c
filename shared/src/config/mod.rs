//! Configuration module
//!
//! - `auth` - Claim values, token lifetime and encoded keys
//! - `environment` - Logging configuration
//!
//! Values are layered: built-in defaults, then an optional `keytoken.toml`
//! (or `.yaml`/`.json`) file, then `KEYTOKEN__SECTION__FIELD` environment
//! variables.

pub mod auth;
pub mod environment;

use serde::{Deserialize, Serialize};

pub use auth::{ClaimsConfig, KeysConfig, TokenConfig, DEFAULT_VALIDITY_SECONDS};
pub use environment::{LogFormat, LoggingConfig};

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "KEYTOKEN";

/// Base name of the optional configuration file
pub const CONFIG_FILE: &str = "keytoken";

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Claim values for issued tokens
    pub claims: ClaimsConfig,

    /// Token lifetime
    pub token: TokenConfig,

    /// Optional pre-provisioned keys
    pub keys: KeysConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Loads configuration from `keytoken.*` and `KEYTOKEN__*` variables
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(CONFIG_FILE, ENV_PREFIX)
    }

    /// Loads configuration from a named file and an environment prefix
    ///
    /// The file is optional. Environment keys use `__` between the prefix,
    /// the section and the field, e.g. `KEYTOKEN__CLAIMS__AUDIENCE`.
    pub fn load_from(file: &str, env_prefix: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(
                config::Environment::with_prefix(env_prefix)
                    .prefix_separator("__")
                    .separator("__")
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
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.token.validity_seconds, 3600);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Full);
        assert!(config.keys.is_empty());
        assert!(config.claims.issuer.contains("issuer"));
    }

    #[test]
    fn test_load_without_sources_uses_defaults() {
        let config = AppConfig::load_from("kt-missing-config-file", "KT_UNUSED_PREFIX")
            .expect("Failed to load config");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_environment_overrides() {
        std::env::set_var("KT_CFG_TEST__CLAIMS__AUDIENCE", "client-42");
        std::env::set_var("KT_CFG_TEST__TOKEN__VALIDITY_SECONDS", "120");
        std::env::set_var("KT_CFG_TEST__LOGGING__FORMAT", "compact");

        let config = AppConfig::load_from("kt-missing-config-file", "KT_CFG_TEST")
            .expect("Failed to load config");

        assert_eq!(config.claims.audience, "client-42");
        assert_eq!(config.claims.issuer, ClaimsConfig::default().issuer);
        assert_eq!(config.token.validity_seconds, 120);
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn test_keys_debug_redacts_secret() {
        let keys = KeysConfig {
            public_key: Some("pk_public".to_string()),
            secret_key: Some("sk_very_secret".to_string()),
        };
        let debug = format!("{:?}", keys);
        assert!(debug.contains("pk_public"));
        assert!(!debug.contains("sk_very_secret"));
    }
}
