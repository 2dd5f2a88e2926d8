//! The credential bundle.

use std::fmt;

/// API credentials for bearer-token and OAuth 1.0a calls.
///
/// Loaded once per process and never mutated afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// OAuth consumer key (`X_API_KEY`).
    pub api_key: String,
    /// OAuth consumer secret (`X_API_SECRET`).
    pub api_secret: String,
    /// OAuth access token (`X_ACCESS_TOKEN`).
    pub access_token: String,
    /// OAuth access token secret (`X_ACCESS_TOKEN_SECRET`).
    pub access_token_secret: String,
    /// App-only bearer token (`X_BEARER_TOKEN`).
    pub bearer_token: String,
}

impl Credentials {
    /// Creates a credential bundle.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_token_secret: impl Into<String>,
        bearer_token: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            access_token: access_token.into(),
            access_token_secret: access_token_secret.into(),
            bearer_token: bearer_token.into(),
        }
    }
}

// Secrets never reach logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("access_token", &self.access_token)
            .field("access_token_secret", &"<redacted>")
            .field("bearer_token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials::new("key", "s3cret", "token", "t0ken-secret", "b3arer");
        let printed = format!("{creds:?}");
        assert!(printed.contains("key"));
        assert!(!printed.contains("s3cret"));
        assert!(!printed.contains("t0ken-secret"));
        assert!(!printed.contains("b3arer"));
    }
}
