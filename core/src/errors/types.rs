//! Error types for key decoding and token operations
//!
//! Each variant belongs to exactly one [`FailureStage`] so callers can tell a
//! misconfigured verifier (key decode) from a forged token (signature) from a
//! stale one (freshness) from a token meant for someone else (claims).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::entities::claims::ReservedClaim;

/// Stage of the issue/verify pipeline at which an error was raised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    /// Turning an encoded key string into usable key material
    KeyDecode,
    /// Producing a signature during issuance
    Signing,
    /// Header algorithm and signature validation
    Signature,
    /// Expiry check
    Freshness,
    /// Reserved claim comparison and payload extraction
    Claims,
}

impl FailureStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureStage::KeyDecode => "key_decode",
            FailureStage::Signing => "signing",
            FailureStage::Signature => "signature",
            FailureStage::Freshness => "freshness",
            FailureStage::Claims => "claims",
        }
    }
}

impl std::fmt::Display for FailureStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while decoding an encoded key string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("Invalid key format: expected prefix '{expected_prefix}'")]
    InvalidKeyFormat { expected_prefix: &'static str },

    #[error("Key decode error: {message}")]
    KeyDecodeError { message: String },
}

impl KeyError {
    /// Machine readable error code
    pub fn code(&self) -> &'static str {
        match self {
            KeyError::InvalidKeyFormat { .. } => "INVALID_KEY_FORMAT",
            KeyError::KeyDecodeError { .. } => "KEY_DECODE_ERROR",
        }
    }

    pub fn stage(&self) -> FailureStage {
        FailureStage::KeyDecode
    }
}

/// Errors raised while signing or verifying a token
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Signing error: {message}")]
    SigningError { message: String },

    #[error("Token signature verification failed: {reason}")]
    BadSignature { reason: String },

    #[error("Token expired at {expired_at}")]
    Expired { expired_at: DateTime<Utc> },

    #[error("Claim mismatch: {claim}")]
    ClaimMismatch { claim: ReservedClaim },

    #[error("Malformed token payload: {message}")]
    MalformedPayload { message: String },
}

impl TokenError {
    /// Machine readable error code
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::SigningError { .. } => "SIGNING_ERROR",
            TokenError::BadSignature { .. } => "BAD_SIGNATURE",
            TokenError::Expired { .. } => "TOKEN_EXPIRED",
            TokenError::ClaimMismatch { .. } => "CLAIM_MISMATCH",
            TokenError::MalformedPayload { .. } => "MALFORMED_PAYLOAD",
        }
    }

    pub fn stage(&self) -> FailureStage {
        match self {
            TokenError::SigningError { .. } => FailureStage::Signing,
            TokenError::BadSignature { .. } => FailureStage::Signature,
            TokenError::Expired { .. } => FailureStage::Freshness,
            TokenError::ClaimMismatch { .. } | TokenError::MalformedPayload { .. } => {
                FailureStage::Claims
            }
        }
    }
}

/// Serializable error description for console or API output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub error: String,
    /// Pipeline stage that failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<FailureStage>,
    /// Human-readable error message
    pub message: String,
    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(
        error: impl ToString,
        stage: Option<FailureStage>,
        message: impl ToString,
    ) -> Self {
        Self {
            error: error.to_string(),
            stage,
            message: message.to_string(),
            timestamp: Utc::now(),
        }
    }
}

impl From<&KeyError> for ErrorResponse {
    fn from(err: &KeyError) -> Self {
        ErrorResponse::new(err.code(), Some(err.stage()), err)
    }
}

impl From<&TokenError> for ErrorResponse {
    fn from(err: &TokenError) -> Self {
        ErrorResponse::new(err.code(), Some(err.stage()), err)
    }
}
