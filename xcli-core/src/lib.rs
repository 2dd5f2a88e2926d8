// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # x-cli Core
//!
//! Core types, models, and traits shared by every x-cli crate.
//!
//! This crate provides the foundational abstractions used across the
//! workspace, including:
//!
//! - Typed models for the X API v2 response envelope
//! - The credential bundle used for bearer and OAuth 1.0a calls
//! - Error types
//! - The injectable [`Clock`] used by the signer and the watch engine
//!
//! ## Key Types
//!
//! ### Response Types
//! - [`Envelope`] - The `{data, includes, meta}` wrapper returned by the API
//! - [`Data`] - Discriminated union of the payload shapes
//! - [`Tweet`] / [`User`] - Primary objects
//! - [`Includes`] / [`Meta`] - Expansions and paging metadata
//!
//! ### Identity
//! - [`Credentials`] - Consumer keys, access tokens, and bearer token
//! - [`parse_tweet_id`] / [`strip_at`] - Input normalization helpers

pub mod error;
pub mod models;
pub mod traits;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Envelope types
    ActionResult,
    ApiErrorDetail,
    Data,
    Envelope,
    Includes,
    Media,
    Meta,
    // Object types
    Article,
    NoteTweet,
    Tweet,
    User,
    // Identity
    Credentials,
    cmp_ids,
    parse_tweet_id,
    strip_at,
};

// Re-export traits
pub use traits::{Clock, FixedClock, SystemClock};
