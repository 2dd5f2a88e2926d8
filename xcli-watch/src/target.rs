//! Watched accounts and session counters.

use std::cmp::Ordering;
use std::collections::HashMap;

use xcli_core::cmp_ids;

/// One watched account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchTarget {
    /// Username without `@`.
    pub username: String,
    /// Numeric account ID.
    pub user_id: String,
    /// Newest tweet ID seen so far; `None` until the first tweet is seen.
    pub last_seen_id: Option<String>,
}

impl WatchTarget {
    /// Creates a target with no cursor.
    pub fn new(username: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            user_id: user_id.into(),
            last_seen_id: None,
        }
    }

    /// Moves the cursor to `id` if it is newer than the current one.
    pub fn advance(&mut self, id: &str) {
        let newer = self
            .last_seen_id
            .as_deref()
            .is_none_or(|current| cmp_ids(id, current) == Ordering::Greater);
        if newer {
            self.last_seen_id = Some(id.to_string());
        }
    }
}

/// Counters for one watch session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchStats {
    /// Tweets emitted across all targets.
    pub tweets_seen: u64,
    /// Completed polling rounds.
    pub polls: u64,
    /// Tweets emitted per username.
    pub per_target: HashMap<String, u64>,
}

impl WatchStats {
    /// Counts one emitted tweet for `username`.
    pub fn record(&mut self, username: &str) {
        self.tweets_seen += 1;
        *self.per_target.entry(username.to_string()).or_default() += 1;
    }

    /// Builds the end-of-session summary, listing targets in watch order.
    pub fn summarize(&self, targets: &[WatchTarget]) -> WatchSummary {
        WatchSummary {
            polls: self.polls,
            tweets_seen: self.tweets_seen,
            per_target: targets
                .iter()
                .map(|t| {
                    let count = self.per_target.get(&t.username).copied().unwrap_or(0);
                    (t.username.clone(), count)
                })
                .collect(),
        }
    }
}

/// What a finished watch session reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchSummary {
    /// Completed polling rounds.
    pub polls: u64,
    /// Tweets emitted across all targets.
    pub tweets_seen: u64,
    /// `(username, tweets emitted)` in watch order.
    pub per_target: Vec<(String, u64)>,
}
