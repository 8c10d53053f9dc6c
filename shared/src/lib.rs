//! Shared configuration for the keytoken workspace
//!
//! This crate holds the configuration types used by the core library and the
//! demo binary:
//! - Claim values stamped into issued tokens
//! - Token validity window
//! - Optional pre-provisioned encoded keys
//! - Logging level and format

pub mod config;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, ClaimsConfig, KeysConfig, LogFormat, LoggingConfig, TokenConfig,
    ENV_PREFIX,
};
