//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Malformed command arguments or settings.
    #[error("validation error: {0}")]
    Validation(String),

    /// The sender is not allowed to issue the command.
    #[error("permission denied: {0}")]
    Forbidden(String),

    /// No GM duration exists with the given id.
    #[error("GM duration not found: {0}")]
    DurationNotFound(i64),

    /// The turn order could not be rebuilt without moving the current turn.
    #[error("turn order inconsistency: {0}")]
    Consistency(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
