//! Fetch error types.

use std::fmt;
use thiserror::Error;

/// Maximum number of raw body bytes kept for diagnostics.
pub const BODY_EXCERPT_LIMIT: usize = 500;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for gateway calls.
///
/// Every response is classified into exactly one of these variants or a
/// successful [`xcli_core::Envelope`].
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, TLS, timeout, reset).
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// The response body was not a well-formed envelope.
    #[error("JSON decode error: {message} (body: {excerpt})")]
    Decode {
        /// Parser message.
        message: String,
        /// First bytes of the raw body.
        excerpt: String,
    },

    /// The API reported a failure.
    #[error("API error{}: {message}", http_suffix(.status))]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Joined error messages.
        message: String,
    },

    /// HTTP 429.
    #[error("{0}")]
    RateLimited(RateLimitSignal),

    /// The request could not be built (e.g. a credential with invalid header bytes).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl FetchError {
    /// Returns the rate-limit signal if this is a 429.
    pub fn rate_limit(&self) -> Option<&RateLimitSignal> {
        match self {
            Self::RateLimited(signal) => Some(signal),
            _ => None,
        }
    }

    /// Returns true if this is a 429.
    pub fn is_rate_limited(&self) -> bool {
        self.rate_limit().is_some()
    }

    /// Builds a decode error carrying an excerpt of the raw body.
    pub fn decode(message: impl Into<String>, body: &[u8]) -> Self {
        Self::Decode {
            message: message.into(),
            excerpt: body_excerpt(body),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}

fn http_suffix(status: &u16) -> String {
    if *status == 200 {
        String::new()
    } else {
        format!(" (HTTP {status})")
    }
}

/// Returns at most [`BODY_EXCERPT_LIMIT`] bytes of `body` as text.
pub fn body_excerpt(body: &[u8]) -> String {
    let end = body.len().min(BODY_EXCERPT_LIMIT);
    String::from_utf8_lossy(&body[..end]).into_owned()
}

// ============================================================================
// Rate Limit Signal
// ============================================================================

/// A 429 response, carrying the reset time the caller needs for backoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitSignal {
    /// Raw `x-rate-limit-reset` header value; `None` when absent.
    pub reset_at: Option<String>,
}

impl RateLimitSignal {
    /// Creates a signal from the raw header value.
    pub fn new(reset_at: Option<&str>) -> Self {
        Self {
            reset_at: reset_at.map(str::to_owned),
        }
    }

    /// Parses the reset header as a Unix timestamp.
    pub fn reset_timestamp(&self) -> Option<i64> {
        self.reset_at.as_deref()?.trim().parse().ok()
    }

    /// Returns the raw reset value, or `unknown`.
    pub fn reset_label(&self) -> &str {
        self.reset_at.as_deref().unwrap_or("unknown")
    }
}

impl fmt::Display for RateLimitSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rate limited (resets at {}). Wait and retry.",
            self.reset_label()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = FetchError::Api {
            status: 404,
            message: "Could not find user".to_string(),
        };
        assert_eq!(err.to_string(), "API error (HTTP 404): Could not find user");

        let err = FetchError::Api {
            status: 200,
            message: "x".to_string(),
        };
        assert_eq!(err.to_string(), "API error: x");
    }

    #[test]
    fn test_rate_limit_signal() {
        let signal = RateLimitSignal::new(Some(" 1700000030 "));
        assert_eq!(signal.reset_timestamp(), Some(1_700_000_030));

        let unknown = RateLimitSignal::new(None);
        assert_eq!(unknown.reset_timestamp(), None);
        assert_eq!(unknown.reset_label(), "unknown");
        assert!(unknown.to_string().contains("Wait and retry"));

        let garbage = RateLimitSignal::new(Some("soon"));
        assert_eq!(garbage.reset_timestamp(), None);
    }

    #[test]
    fn test_body_excerpt_is_truncated() {
        let body = vec![b'a'; 2000];
        assert_eq!(body_excerpt(&body).len(), BODY_EXCERPT_LIMIT);
        assert_eq!(body_excerpt(b"short"), "short");
    }
}
