//! Error types for Atmark

use thiserror::Error;

/// Core error type for Atmark operations
#[derive(Error, Debug)]
pub enum AtmarkError {
    /// A screen-geometry lookup failed (node detached, offset offscreen).
    /// Always recoverable: callers resolve this to a hidden position.
    #[error("Geometry error: {0}")]
    Geometry(String),

    /// A recorded range no longer matches the current document structure.
    /// The pending edit is aborted; the overlay still closes.
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Document error: {0}")]
    Document(String),

    /// The suggestion provider rejected or timed out. Treated as an empty
    /// candidate list, never as a crash.
    #[error("Provider error: {0}")]
    Provider(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for Atmark operations
pub type Result<T> = std::result::Result<T, AtmarkError>;
