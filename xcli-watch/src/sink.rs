//! Where the engine reports progress.

use std::time::Duration;

use xcli_core::Envelope;
use xcli_fetch::FetchError;

use crate::target::{WatchSummary, WatchTarget};

/// Something the engine wants shown to the user.
#[derive(Debug)]
pub enum WatchEvent<'a> {
    /// Resolution succeeded; seeding is about to start.
    Initializing,

    /// A target was seeded.
    Tracking(&'a WatchTarget),

    /// Polling is about to start.
    Started {
        /// All targets in watch order.
        targets: &'a [WatchTarget],
        /// Pause between rounds.
        interval: Duration,
        /// Active keywords.
        filters: &'a [String],
    },

    /// A new tweet passed the filter.
    Tweet {
        /// Account it came from.
        username: &'a str,
        /// Single-tweet envelope with the page's expansions.
        envelope: &'a Envelope,
    },

    /// A poll hit the rate limit; the engine is about to wait.
    RateLimited {
        /// Account whose poll was limited.
        username: &'a str,
        /// How long the engine will wait.
        wait: Duration,
    },

    /// A poll failed for a reason other than rate limiting.
    TargetFailed {
        /// Account whose poll failed.
        username: &'a str,
        /// The failure.
        error: &'a FetchError,
    },

    /// The tweet limit was reached.
    MaxReached {
        /// The configured limit.
        max: u64,
    },

    /// The session ended. Sent exactly once.
    Summary(&'a WatchSummary),
}

/// Receives [`WatchEvent`]s in order.
pub trait WatchSink: Send {
    /// Handles one event.
    fn on_event(&mut self, event: WatchEvent<'_>);
}
