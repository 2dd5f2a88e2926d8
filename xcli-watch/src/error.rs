//! Watch error types.

use thiserror::Error;
use xcli_fetch::FetchError;

/// Errors that abort a watch before polling starts.
///
/// Failures while polling never surface here; they are reported through
/// the sink and the target is skipped for that round.
#[derive(Debug, Error)]
pub enum WatchError {
    /// A username could not be resolved to an account ID.
    #[error("could not find user @{username}: {source}")]
    Resolve {
        /// The username as given, without `@`.
        username: String,
        /// The lookup failure.
        #[source]
        source: FetchError,
    },

    /// No usernames were given.
    #[error("no accounts to watch")]
    NoTargets,
}
