// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # x-cli Fetch
//!
//! Request signing, HTTP transport, and the API gateway for x-cli.
//!
//! ## Signing
//!
//! - [`oauth::OAuthSigner`] - OAuth 1.0a HMAC-SHA1 `Authorization` headers
//!
//! ## Gateway
//!
//! - [`client::ApiClient`] - Bearer and OAuth calls, response classification,
//!   and the memoized authenticated user ID
//! - [`endpoints`] - One builder per API endpoint
//! - [`transport::Transport`] - The network seam, with
//!   [`host::http::ReqwestTransport`] as the production implementation
//!
//! ## Rate Limits
//!
//! - [`error::RateLimitSignal`] - Carried by every 429
//! - [`retry::RateLimitBackoff`] - How long to wait before retrying
//!
//! ## Example
//!
//! ```ignore
//! use xcli_fetch::ApiClient;
//!
//! let client = ApiClient::new(credentials)?;
//! let envelope = client.get_user("jack").await?;
//! ```

// Core modules
pub mod client;
pub mod endpoints;
pub mod error;
pub mod host;
pub mod oauth;
pub mod retry;
pub mod transport;

// Re-export key types at crate root

// Errors
pub use error::{FetchError, RateLimitSignal};

// Gateway
pub use client::{API_BASE, ApiClient, RATE_LIMIT_RESET_HEADER, classify};
pub use endpoints::PollSpec;
pub use host::http::ReqwestTransport;
pub use transport::{HttpRequest, HttpResponse, Transport};

// Signing
pub use oauth::{NonceSource, OAuthSigner, RandomNonce, StaticNonce, percent_encode};

// Backoff
pub use retry::RateLimitBackoff;
