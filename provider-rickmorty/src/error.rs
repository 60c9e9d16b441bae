//! Error types for the Rick and Morty provider

use thiserror::Error;

/// Remote source errors
#[derive(Error, Debug)]
pub enum RemoteError {
    /// API request completed with a non-success status
    #[error("API error (status {status})")]
    Api { status: u16 },

    /// Request could not be sent or the connection failed
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body could not be decoded
    #[error("Failed to parse API response: {0}")]
    Parse(String),

    /// Base URL or path segment could not be combined into a request URL
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

/// Result type for remote source operations
pub type Result<T> = std::result::Result<T, RemoteError>;
