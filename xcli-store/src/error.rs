//! Store error types.

use thiserror::Error;

/// Errors that can occur while loading credentials or configuration.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required credential is not set anywhere.
    #[error(
        "Missing env var: {0}. Set X_API_KEY, X_API_SECRET, X_ACCESS_TOKEN, X_ACCESS_TOKEN_SECRET, X_BEARER_TOKEN."
    )]
    MissingCredential(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Returns true if the user can fix this by setting credentials.
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, StoreError::MissingCredential(_))
    }
}
