//! ES256 key material: generation, encoded-key decoding and PEM export

use jsonwebtoken::{DecodingKey, EncodingKey};
use p256::pkcs8::spki::SubjectPublicKeyInfoRef;
use p256::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding, PrivateKeyInfo};
use p256::{PublicKey, SecretKey};
use rand::rngs::OsRng;

use crate::domain::entities::key::{EncodedKey, KeyRole};
use crate::errors::{DomainError, DomainResult, KeyError, TokenError};
use crate::services::codec::KeyCodec;

/// A P-256 key pair held in encoded form
///
/// The secret key never shows up in `Debug` output.
#[derive(Clone)]
pub struct Es256KeyPair {
    public_key: EncodedKey,
    secret_key: EncodedKey,
}

impl std::fmt::Debug for Es256KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Es256KeyPair")
            .field("public_key", &self.public_key.as_str())
            .finish_non_exhaustive()
    }
}

impl Es256KeyPair {
    /// Generates a fresh P-256 key pair from the OS random source
    ///
    /// # Returns
    ///
    /// * `Ok(Es256KeyPair)` - Public key encoded as `pk_<SPKI>`, secret key as `sk_<PKCS8>`
    /// * `Err(DomainError)` - DER serialization of the generated key failed
    ///
    /// # Example
    ///
    /// ```
    /// use kt_core::services::token::Es256KeyPair;
    ///
    /// let pair = Es256KeyPair::generate().expect("Failed to generate keys");
    /// assert!(pair.public_key().as_str().starts_with("pk_"));
    /// assert!(pair.secret_key().as_str().starts_with("sk_"));
    /// ```
    pub fn generate() -> DomainResult<Self> {
        let secret = SecretKey::random(&mut OsRng);

        let secret_der = secret.to_pkcs8_der().map_err(|e| DomainError::Internal {
            message: format!("Failed to encode secret key: {}", e),
        })?;
        let public_der = secret
            .public_key()
            .to_public_key_der()
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to encode public key: {}", e),
            })?;

        Ok(Self::from_der(public_der.as_bytes(), secret_der.as_bytes()))
    }

    /// Builds a pair from already encoded keys
    ///
    /// Only the prefixes and base64 bodies are checked here; DER structure is
    /// checked when a key is used.
    pub fn from_encoded(public_key: &str, secret_key: &str) -> DomainResult<Self> {
        let public_der = KeyCodec::decode(public_key, KeyRole::Public)?;
        let secret_der = KeyCodec::decode(secret_key, KeyRole::Secret)?;

        Ok(Self::from_der(&public_der, &secret_der))
    }

    /// Builds a pair from SPKI and PKCS8 DER bytes
    pub fn from_der(public_der: &[u8], secret_der: &[u8]) -> Self {
        Self {
            public_key: KeyCodec::encode(public_der, KeyRole::Public),
            secret_key: KeyCodec::encode(secret_der, KeyRole::Secret),
        }
    }

    pub fn public_key(&self) -> &EncodedKey {
        &self.public_key
    }

    pub fn secret_key(&self) -> &EncodedKey {
        &self.secret_key
    }
}

/// Parses an encoded secret key into a P-256 secret key
///
/// * `KeyError::InvalidKeyFormat` / `KeyError::KeyDecodeError` - bad prefix, base64 or DER
/// * `TokenError::SigningError` - well-formed PKCS8 for another algorithm or curve
fn parse_secret_key(encoded: &str) -> DomainResult<SecretKey> {
    let der = KeyCodec::decode(encoded, KeyRole::Secret)?;

    let info = PrivateKeyInfo::try_from(der.as_slice()).map_err(|e| KeyError::KeyDecodeError {
        message: format!("Secret key is not PKCS8 DER: {}", e),
    })?;

    SecretKey::try_from(info).map_err(|e| {
        DomainError::Token(TokenError::SigningError {
            message: format!("ES256 requires a P-256 secret key: {}", e),
        })
    })
}

/// Parses an encoded public key into a P-256 public key
fn parse_public_key(encoded: &str) -> Result<PublicKey, KeyError> {
    let der = KeyCodec::decode(encoded, KeyRole::Public)?;

    let spki =
        SubjectPublicKeyInfoRef::try_from(der.as_slice()).map_err(|e| KeyError::KeyDecodeError {
            message: format!("Public key is not SPKI DER: {}", e),
        })?;

    PublicKey::try_from(spki).map_err(|e| KeyError::KeyDecodeError {
        message: format!("Public key is not a P-256 key: {}", e),
    })
}

/// Decodes an encoded secret key into a JWT signing key
pub fn decode_secret_key(encoded: &str) -> DomainResult<EncodingKey> {
    let secret = parse_secret_key(encoded)?;

    // Re-encoding guarantees the embedded public key the signer expects
    let der = secret.to_pkcs8_der().map_err(|e| TokenError::SigningError {
        message: format!("Failed to encode secret key: {}", e),
    })?;

    Ok(EncodingKey::from_ec_der(der.as_bytes()))
}

/// Decodes an encoded public key into a JWT verification key
pub fn decode_public_key(encoded: &str) -> Result<DecodingKey, KeyError> {
    let pem = public_key_pem(encoded)?;

    DecodingKey::from_ec_pem(pem.as_bytes()).map_err(|e| KeyError::KeyDecodeError {
        message: format!("Public key rejected by verifier: {}", e),
    })
}

/// Reconstructs the SPKI PEM of an encoded public key
///
/// Useful for pasting into JWT debuggers.
pub fn public_key_pem(encoded: &str) -> Result<String, KeyError> {
    parse_public_key(encoded)?
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| KeyError::KeyDecodeError {
            message: format!("Failed to encode public key PEM: {}", e),
        })
}

/// Reconstructs the PKCS8 PEM of an encoded secret key
pub fn secret_key_pem(encoded: &str) -> DomainResult<String> {
    let pem = parse_secret_key(encoded)?
        .to_pkcs8_pem(LineEnding::LF)
        .map_err(|e| KeyError::KeyDecodeError {
            message: format!("Failed to encode secret key PEM: {}", e),
        })?;

    Ok(pem.as_str().to_owned())
}
