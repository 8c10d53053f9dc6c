//! Business services: key encoding and token issuance/verification.

pub mod codec;
pub mod token;

// Re-export commonly used types
pub use codec::{restore_padding, KeyCodec};
pub use token::{Es256KeyPair, TokenService};
