// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # x-cli Watch
//!
//! Continuous, rate-limit-aware polling of one or more accounts.
//!
//! The [`WatchEngine`] resolves usernames, seeds a cursor per account, then
//! polls each account in turn for tweets newer than its cursor. Matching
//! tweets are handed to a [`WatchSink`] oldest-first. The loop ends when a
//! tweet limit is reached or its [`CancellationToken`] fires, and always
//! reports a [`WatchSummary`] exactly once.
//!
//! ```ignore
//! let cancel = CancellationToken::new();
//! let engine = WatchEngine::new(client, WatchOptions::default(), cancel.clone());
//! let summary = engine.run(&["jack".to_string()], &mut sink).await?;
//! ```

pub mod api;
pub mod engine;
pub mod error;
pub mod filter;
pub mod notify;
pub mod sink;
pub mod target;

pub use api::WatchApi;
pub use engine::{WatchEngine, WatchOptions};
pub use error::WatchError;
pub use filter::KeywordFilter;
pub use notify::{DesktopNotifier, Notifier};
pub use sink::{WatchEvent, WatchSink};
pub use target::{WatchStats, WatchSummary, WatchTarget};

pub use tokio_util::sync::CancellationToken;
