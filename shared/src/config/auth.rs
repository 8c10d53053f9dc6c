//! Token issuance configuration: claim values, validity window and keys

use serde::{Deserialize, Serialize};

/// Default token validity in seconds (1 hour)
pub const DEFAULT_VALIDITY_SECONDS: i64 = 3600;

/// Reserved claim values stamped into every issued token
///
/// The same values must be supplied again at verification time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClaimsConfig {
    /// Identifies the issuer, typically the issuer URI (`iss`)
    pub issuer: String,

    /// Describes the main purpose of the token (`sub`)
    pub subject: String,

    /// Identifies the intended recipient, such as a client id (`aud`)
    pub audience: String,
}

impl Default for ClaimsConfig {
    fn default() -> Self {
        Self {
            issuer: String::from("something_that_identifies_the_issuer_such_as_issuer_uri"),
            subject: String::from("something_that_describes_the_main_purpose_of_the_token"),
            audience: String::from("some_client_id_that_identify_the_recipient"),
        }
    }
}

/// Token lifetime configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TokenConfig {
    /// Seconds between `iat` and `exp`
    pub validity_seconds: i64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            validity_seconds: DEFAULT_VALIDITY_SECONDS,
        }
    }
}

/// Pre-provisioned encoded keys (`pk_...` / `sk_...`)
///
/// Both fields are optional; a caller that finds neither set is expected to
/// generate a fresh pair.
#[derive(Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct KeysConfig {
    /// Encoded SPKI public key
    pub public_key: Option<String>,

    /// Encoded PKCS8 secret key
    pub secret_key: Option<String>,
}

impl KeysConfig {
    /// Returns true when no key is configured at all
    pub fn is_empty(&self) -> bool {
        self.public_key.is_none() && self.secret_key.is_none()
    }
}

impl std::fmt::Debug for KeysConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeysConfig")
            .field("public_key", &self.public_key)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
