//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::{ErrorResponse, FailureStage, KeyError, TokenError};

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Machine readable error code
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Key(err) => err.code(),
            DomainError::Token(err) => err.code(),
            DomainError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Stage that raised the error; `None` for internal failures
    pub fn stage(&self) -> Option<FailureStage> {
        match self {
            DomainError::Key(err) => Some(err.stage()),
            DomainError::Token(err) => Some(err.stage()),
            DomainError::Internal { .. } => None,
        }
    }
}

impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        ErrorResponse::new(err.code(), err.stage(), err)
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
