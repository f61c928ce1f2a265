//! Domain error model.

use thiserror::Error;

/// Result type used across the domain and use-case layers.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Each variant maps to exactly one HTTP status at the delivery boundary;
/// storage and transport failures never show up here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A request failed validation (missing or oversized field).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The requested record does not exist (or is not visible to the caller).
    #[error("not found")]
    NotFound,

    /// The record already exists.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Credentials or token were rejected.
    #[error("unauthorized")]
    Unauthorized,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
