//! # keytoken core
//!
//! Encoded key codec and ES256 claim-bound tokens.
//!
//! Keys travel as prefixed, padding-free base64 strings (`pk_...` for SPKI
//! public keys, `sk_...` for PKCS8 secret keys). Tokens are compact ES256 JWS
//! values carrying a caller payload plus the reserved `issuer`, `subject` and
//! `audience` claims, which must match exactly at verification.
//!
//! ```
//! use kt_core::{ClaimSet, Es256KeyPair, TokenService};
//! use serde_json::{json, Value};
//!
//! let pair = Es256KeyPair::generate()?;
//! let service = TokenService::new();
//!
//! let issuer_claims = ClaimSet::new("issuer", "subject", "audience");
//! let token = service.issue(
//!     pair.secret_key().as_str(),
//!     &json!({"sample": "hello"}),
//!     &issuer_claims,
//!     3600,
//! )?;
//!
//! let verifier_claims = ClaimSet::new("issuer", "subject", "audience");
//! let payload: Value = service.verify(&token, pair.public_key().as_str(), &verifier_claims)?;
//! assert_eq!(payload, json!({"sample": "hello"}));
//! # Ok::<(), kt_core::DomainError>(())
//! ```

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
