//! Error types for orthofoot

use thiserror::Error;

/// Main error type for orthofoot operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Degenerate input geometry: {reason}")]
    InputGeometry { reason: String },

    #[error("Storage error in table '{table}': {reason}")]
    Storage { table: String, reason: String },

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Result type alias for orthofoot operations
pub type Result<T> = std::result::Result<T, Error>;
