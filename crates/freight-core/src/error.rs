//! Error types for Freight domain operations

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FreightError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Freight has no ID; derive it before comparing")]
    Unidentified,

    #[error("Stale Freight ID: stored {stored}, derived {derived}")]
    StaleId { stored: String, derived: String },

    #[error("Invalid Freight ID: {0}")]
    InvalidId(String),

    #[error("Unsupported document kind: {0}")]
    UnsupportedKind(String),
}

/// Result type for Freight domain operations
pub type Result<T> = std::result::Result<T, FreightError>;
