//! Domain entities representing keys and claims.

pub mod claims;
pub mod key;

// Re-export commonly used types
pub use claims::{ClaimSet, ReservedClaim, TokenClaims};
pub use key::{EncodedKey, KeyRole, PUBLIC_KEY_PREFIX, SECRET_KEY_PREFIX};
