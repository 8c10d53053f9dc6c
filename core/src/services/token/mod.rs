//! Token service module for ES256 tokens
//!
//! This module handles:
//! - P-256 key generation in encoded (`pk_`/`sk_`) form
//! - Decoding encoded keys into signing and verification keys
//! - PEM reconstruction of encoded keys
//! - Claim-bound token issuance and verification

mod key_manager;
mod service;

#[cfg(test)]
mod tests;

pub use key_manager::{
    decode_public_key, decode_secret_key, public_key_pem, secret_key_pem, Es256KeyPair,
};
pub use service::{TokenService, TOKEN_ALGORITHM};
