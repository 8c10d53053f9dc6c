//! Encoded key entities.

use serde::{Deserialize, Serialize};

/// Prefix marking an encoded SPKI public key
pub const PUBLIC_KEY_PREFIX: &str = "pk_";

/// Prefix marking an encoded PKCS8 secret key
pub const SECRET_KEY_PREFIX: &str = "sk_";

/// Role of a key, identified by the prefix of its encoded form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyRole {
    /// Public key, DER encoded as SubjectPublicKeyInfo
    Public,
    /// Private key, DER encoded as PKCS8
    Secret,
}

impl KeyRole {
    pub fn prefix(&self) -> &'static str {
        match self {
            KeyRole::Public => PUBLIC_KEY_PREFIX,
            KeyRole::Secret => SECRET_KEY_PREFIX,
        }
    }
}

impl std::fmt::Display for KeyRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyRole::Public => write!(f, "public"),
            KeyRole::Secret => write!(f, "secret"),
        }
    }
}

/// A key in its prefixed, padding-free base64 text form
///
/// Only [`crate::services::codec::KeyCodec::encode`] builds these, so the text
/// always starts with the prefix of `role`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct EncodedKey {
    role: KeyRole,
    text: String,
}

impl EncodedKey {
    pub(crate) fn new(role: KeyRole, text: String) -> Self {
        Self { role, text }
    }

    pub fn role(&self) -> KeyRole {
        self.role
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl AsRef<str> for EncodedKey {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for EncodedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

impl std::fmt::Debug for EncodedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self.role {
            KeyRole::Public => self.text.as_str(),
            KeyRole::Secret => "sk_<redacted>",
        };
        f.debug_struct("EncodedKey")
            .field("role", &self.role)
            .field("text", &text)
            .finish()
    }
}
