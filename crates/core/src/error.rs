//! Error types for sheetcut.
//!
//! Optimization itself never fails: parts that cannot be placed are reported
//! as data in [`OptimizeResult::unplaced`](crate::OptimizeResult). These
//! errors cover input validation only.

use thiserror::Error;

/// Result type alias for sheetcut operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while validating optimizer inputs.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid part definition.
    #[error("Invalid part: {0}")]
    InvalidPart(String),

    /// Invalid stock sheet definition.
    #[error("Invalid stock sheet: {0}")]
    InvalidStock(String),

    /// Invalid cut settings.
    #[error("Invalid cut settings: {0}")]
    InvalidSettings(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
