
use crate::domain::entities::key::KeyRole;
use crate::services::codec::KeyCodec;

/// RFC 8410 Ed25519 private key, valid PKCS8 for the wrong algorithm
const ED25519_PKCS8: &str = "MC4CAQAwBQYDK2VwBCIEINTuctv5E1hK1bbY8fdp+K06/nwoy/HU++CXqI9EdVhC";

/// RFC 8410 Ed25519 public key, valid SPKI for the wrong algorithm
const ED25519_SPKI: &str = "MCowBQYDK2VwAyEAGb9ECWmEzf6FQbrBZ9w7lshQhqowtrbLDFw4rXAxZuE";

pub(super) fn ed25519_secret_key() -> String {
    format!("sk_{}", ED25519_PKCS8)
}

pub(super) fn ed25519_public_key() -> String {
    format!("pk_{}", ED25519_SPKI)
}

pub(super) fn encoded(bytes: &[u8], role: KeyRole) -> String {
    KeyCodec::encode(bytes, role).into_string()
}
