//! Domain models for x-cli.
//!
//! This module contains the typed shapes of X API v2 responses and the
//! credential bundle used to authenticate requests.
//!
//! ## Submodules
//!
//! - [`envelope`] - The response envelope and its [`Data`] union
//! - [`tweet`] - Tweet objects and their extended-text payloads
//! - [`user`] - User objects
//! - [`credentials`] - The five-field credential bundle
//! - [`ids`] - Tweet ID parsing and ordering

mod credentials;
mod envelope;
mod ids;
mod tweet;
mod user;

// Re-export everything at the models level
pub use credentials::Credentials;
pub use envelope::{ActionResult, ApiErrorDetail, Data, Envelope, Includes, Media, Meta};
pub use ids::{cmp_ids, parse_tweet_id, strip_at};
pub use tweet::{Article, NoteTweet, Tweet};
pub use user::User;

#[cfg(test)]
mod serde_tests;
