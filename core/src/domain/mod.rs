//! Domain layer containing encoded keys and token claims.

pub mod entities;

// Re-export commonly used domain types
pub use entities::*;
