//! Core error types for x-cli.

use thiserror::Error;

/// Core error type for x-cli operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Input could not be interpreted as a tweet ID or tweet URL.
    #[error("Invalid tweet ID or URL: {0}")]
    InvalidTweetId(String),

    /// Invalid data from API response.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
