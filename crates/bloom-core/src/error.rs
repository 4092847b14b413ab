//! Error types for bloom-core

use thiserror::Error;

/// Result type alias using bloom-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in bloom-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport failure talking to the remote note service
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote note service rejected the request
    #[error("API error: {0}")]
    Api(String),

    /// Session missing or expired on an authenticated-path operation
    #[error("Unauthorized")]
    Unauthorized,

    /// Target record no longer exists or is not owned by the session
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
