//! Main token service implementation

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, encode, Algorithm, Header, Validation};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::entities::claims::{ClaimSet, TokenClaims};
use crate::errors::{DomainResult, TokenError};

use super::key_manager::{decode_public_key, decode_secret_key};

/// The only algorithm tokens are signed and accepted with
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::ES256;

/// Service issuing and verifying ES256 tokens bound to a [`ClaimSet`]
///
/// Holds no key material; every call takes the encoded key it needs, so one
/// instance can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct TokenService {
    validation: Validation,
}

impl Default for TokenService {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenService {
    /// Creates a token service pinned to ES256
    pub fn new() -> Self {
        let mut validation = Validation::new(TOKEN_ALGORITHM);
        // Freshness and reserved claims are checked after the signature so
        // each failure reports its own stage
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self { validation }
    }

    /// Signs `payload` together with the reserved claims
    ///
    /// # Arguments
    ///
    /// * `secret_key` - Encoded PKCS8 secret key (`sk_...`)
    /// * `payload` - Any serializable value, carried under `data`
    /// * `claims` - Issuer, subject and audience to stamp into the token
    /// * `validity_seconds` - Seconds from now until `exp`
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The compact ES256 token
    /// * `Err(DomainError)` - Key decoding or signing failed
    pub fn issue<T: Serialize>(
        &self,
        secret_key: &str,
        payload: &T,
        claims: &ClaimSet,
        validity_seconds: i64,
    ) -> DomainResult<String> {
        if validity_seconds <= 0 {
            tracing::warn!(
                validity_seconds = validity_seconds,
                "Issuing a token that is already expired"
            );
        }

        let encoding_key = decode_secret_key(secret_key)?;
        let token_claims = TokenClaims::new(payload, claims, Utc::now(), validity_seconds);

        let token = encode(&Header::new(TOKEN_ALGORITHM), &token_claims, &encoding_key)
            .map_err(|e| TokenError::SigningError {
                message: e.to_string(),
            })?;

        tracing::debug!(
            issuer = claims.issuer(),
            subject = claims.subject(),
            audience = claims.audience(),
            exp = token_claims.exp,
            "Issued ES256 token"
        );

        Ok(token)
    }

    /// Verifies a token and returns its payload
    ///
    /// Checks run in order: public key decoding, algorithm and signature,
    /// expiry, then `issuer`, `subject` and `audience`. The first failing
    /// check determines the error.
    pub fn verify<T: DeserializeOwned>(
        &self,
        token: &str,
        public_key: &str,
        expected_claims: &ClaimSet,
    ) -> DomainResult<T> {
        self.verify_claims(token, public_key, expected_claims)
            .map(TokenClaims::into_data)
    }

    /// Verifies a token and returns the whole signed body
    ///
    /// Same checks as [`TokenService::verify`]; use this when `iat`/`exp`
    /// are needed alongside the payload.
    pub fn verify_claims<T: DeserializeOwned>(
        &self,
        token: &str,
        public_key: &str,
        expected_claims: &ClaimSet,
    ) -> DomainResult<TokenClaims<T>> {
        let result = self.verify_at(token, public_key, expected_claims, Utc::now().timestamp());

        match &result {
            Ok(claims) => tracing::debug!(exp = claims.exp, "Token verified"),
            Err(e) => tracing::warn!(
                code = e.code(),
                stage = e.stage().map(|s| s.as_str()).unwrap_or("internal"),
                "Token verification failed: {}",
                e
            ),
        }

        result
    }

    /// Verification against an explicit clock reading (seconds since epoch)
    pub(crate) fn verify_at<T: DeserializeOwned>(
        &self,
        token: &str,
        public_key: &str,
        expected_claims: &ClaimSet,
        now: i64,
    ) -> DomainResult<TokenClaims<T>> {
        let decoding_key = decode_public_key(public_key)?;

        let header = decode_header(token).map_err(|e| TokenError::BadSignature {
            reason: format!("Unreadable token header: {}", e),
        })?;
        if header.alg != TOKEN_ALGORITHM {
            return Err(TokenError::BadSignature {
                reason: format!("Algorithm {:?} is not permitted, expected ES256", header.alg),
            }
            .into());
        }

        let claims = decode::<TokenClaims<serde_json::Value>>(token, &decoding_key, &self.validation)
            .map_err(map_decode_error)?
            .claims;

        if claims.is_expired_at(now) {
            return Err(TokenError::Expired {
                expired_at: claims.expires_at().unwrap_or(DateTime::<Utc>::MIN_UTC),
            }
            .into());
        }

        if let Some(claim) = expected_claims.first_mismatch(&claims) {
            return Err(TokenError::ClaimMismatch { claim }.into());
        }

        let data = serde_json::from_value(claims.data).map_err(|e| TokenError::MalformedPayload {
            message: e.to_string(),
        })?;

        Ok(TokenClaims {
            data,
            iat: claims.iat,
            exp: claims.exp,
            iss: claims.iss,
            sub: claims.sub,
            aud: claims.aud,
        })
    }
}

/// Maps a `jsonwebtoken` decode failure onto the verification stages
///
/// The header was already parsed, so JSON and UTF-8 errors can only come from
/// the signed claims.
fn map_decode_error(error: jsonwebtoken::errors::Error) -> TokenError {
    match error.kind() {
        ErrorKind::Json(_) | ErrorKind::Utf8(_) => TokenError::MalformedPayload {
            message: error.to_string(),
        },
        _ => TokenError::BadSignature {
            reason: error.to_string(),
        },
    }
}
