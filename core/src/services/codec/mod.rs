//! Key codec module
//!
//! Converts DER key bytes to and from the prefixed text form used to move keys
//! around as plain strings (`pk_...` for SPKI public keys, `sk_...` for PKCS8
//! secret keys).

mod key_codec;


pub use key_codec::{restore_padding, KeyCodec};
