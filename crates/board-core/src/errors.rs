//! Cross-cutting error types for Boardroom.
//!
//! Domain-specific errors (e.g., `GatewayError`, `ConfigError`) are defined in
//! their respective crates. The binary converges them through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Boardroom crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Record lookup returned no result.
    #[error("Record not found: {id}")]
    NotFound { id: i64 },

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
