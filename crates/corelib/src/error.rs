//! Error types for the core library.
//!
//! The ring itself never fails: an empty ring answers lookups with `None`.
//! Errors only come from loading and validating configuration.

use thiserror::Error;

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the core library.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration was readable but not acceptable.
    #[error("Invalid configuration: {0}")]
    Config(String),
    /// Configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Configuration file was not valid JSON for the expected shape.
    #[error("Malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
}
