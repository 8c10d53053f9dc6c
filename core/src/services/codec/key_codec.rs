//! Prefixed, padding-free base64 codec for DER key bytes

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::domain::entities::key::{EncodedKey, KeyRole};
use crate::errors::KeyError;

/// Number of `=` characters needed to pad a base64 body of `length` chars
///
/// Bodies whose length is `1 mod 4` cannot come from any byte sequence; the
/// three characters returned for them still yield invalid base64, which the
/// decoder then rejects.
pub const fn restore_padding(length: usize) -> usize {
    (4 - length % 4) % 4
}

/// Stateless codec between DER bytes and [`EncodedKey`] text
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyCodec;

impl KeyCodec {
    /// Encodes DER bytes as `<prefix><base64 without padding>`
    pub fn encode(der: &[u8], role: KeyRole) -> EncodedKey {
        let body = BASE64.encode(der);
        let body = body.trim_end_matches('=');

        let mut text = String::with_capacity(role.prefix().len() + body.len());
        text.push_str(role.prefix());
        text.push_str(body);
        EncodedKey::new(role, text)
    }

    /// Decodes an encoded key back to its DER bytes
    ///
    /// # Errors
    ///
    /// * `KeyError::InvalidKeyFormat` - `text` does not start with the prefix of `role`
    /// * `KeyError::KeyDecodeError` - the body is not valid base64 or carries
    ///   its own `=` padding
    pub fn decode(text: &str, role: KeyRole) -> Result<Vec<u8>, KeyError> {
        let body = text
            .strip_prefix(role.prefix())
            .ok_or(KeyError::InvalidKeyFormat {
                expected_prefix: role.prefix(),
            })?;

        // Encoded keys never carry padding
        if body.contains('=') {
            return Err(KeyError::KeyDecodeError {
                message: format!("Padding is not allowed in {} key", role),
            });
        }

        let mut padded = String::with_capacity(body.len() + 3);
        padded.push_str(body);
        padded.extend(std::iter::repeat('=').take(restore_padding(body.len())));

        BASE64
            .decode(padded.as_bytes())
            .map_err(|e| KeyError::KeyDecodeError {
                message: format!("Invalid base64 in {} key: {}", role, e),
            })
    }

    /// Decodes a key that may be absent, e.g. an unset configuration value
    ///
    /// An absent key is reported as `KeyError::InvalidKeyFormat`.
    pub fn decode_optional(text: Option<&str>, role: KeyRole) -> Result<Vec<u8>, KeyError> {
        match text {
            Some(text) => Self::decode(text, role),
            None => Err(KeyError::InvalidKeyFormat {
                expected_prefix: role.prefix(),
            }),
        }
    }
}
