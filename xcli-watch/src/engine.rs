//! The polling loop.
//!
//! One task drives everything: targets are polled one after another, and
//! the only suspension points are the gateway call and the interruptible
//! sleeps. A request already in flight when cancellation arrives is allowed
//! to finish and its tweets are processed; cancellation is checked before
//! every new request and wins every sleep.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use xcli_core::{Clock, Data, Envelope, SystemClock, Tweet, cmp_ids, strip_at};
use xcli_fetch::{FetchError, RateLimitBackoff};

use crate::api::WatchApi;
use crate::error::WatchError;
use crate::filter::KeywordFilter;
use crate::notify::Notifier;
use crate::sink::{WatchEvent, WatchSink};
use crate::target::{WatchStats, WatchSummary, WatchTarget};

/// Default pause between polling rounds.
const DEFAULT_INTERVAL_SECS: u64 = 60;

/// Tweets requested per poll.
const DEFAULT_PAGE_SIZE: u32 = 10;

/// Tweets requested when seeding a cursor.
const SEED_PAGE_SIZE: u32 = 5;

// ============================================================================
// Options
// ============================================================================

/// How a watch session behaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchOptions {
    /// Pause between polling rounds.
    pub interval: Duration,
    /// Keywords a tweet must contain (any of); empty passes everything.
    pub filters: Vec<String>,
    /// Stop after this many emitted tweets; `0` means unlimited.
    pub max_tweets: u64,
    /// Tweets requested per poll.
    pub page_size: u32,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            filters: Vec::new(),
            max_tweets: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Whether the loop keeps going after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

// ============================================================================
// Engine
// ============================================================================

/// Polls a fixed set of accounts until cancelled or a tweet limit is hit.
pub struct WatchEngine<A> {
    api: A,
    options: WatchOptions,
    filter: KeywordFilter,
    backoff: RateLimitBackoff,
    clock: Arc<dyn Clock>,
    notifier: Option<Arc<dyn Notifier>>,
    cancel: CancellationToken,
}

impl<A: WatchApi> WatchEngine<A> {
    /// Creates an engine over `api` that stops when `cancel` fires.
    pub fn new(api: A, options: WatchOptions, cancel: CancellationToken) -> Self {
        let filter = KeywordFilter::new(options.filters.clone());
        Self {
            api,
            options,
            filter,
            backoff: RateLimitBackoff::default(),
            clock: Arc::new(SystemClock),
            notifier: None,
            cancel,
        }
    }

    /// Replaces the clock used to compute rate-limit waits.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the rate-limit backoff policy.
    pub fn with_backoff(mut self, backoff: RateLimitBackoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Notifies through `notifier` for every emitted tweet.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Returns the options this engine runs with.
    pub fn options(&self) -> &WatchOptions {
        &self.options
    }

    /// Runs the session to completion.
    ///
    /// # Errors
    ///
    /// Fails only during setup: when no usernames are given or one of them
    /// cannot be resolved. Once polling starts the session always ends with
    /// `Ok`, after sending exactly one [`WatchEvent::Summary`].
    #[instrument(skip(self, sink), fields(targets = usernames.len()))]
    pub async fn run(
        &self,
        usernames: &[String],
        sink: &mut dyn WatchSink,
    ) -> Result<WatchSummary, WatchError> {
        let mut targets = self.resolve(usernames).await?;

        sink.on_event(WatchEvent::Initializing);
        for target in &mut targets {
            self.seed(target).await;
            sink.on_event(WatchEvent::Tracking(target));
        }

        sink.on_event(WatchEvent::Started {
            targets: &targets,
            interval: self.options.interval,
            filters: self.filter.keywords(),
        });
        info!(interval_secs = self.options.interval.as_secs(), "Watch started");

        let mut stats = WatchStats::default();
        self.poll_loop(&mut targets, &mut stats, sink).await;

        let summary = stats.summarize(&targets);
        sink.on_event(WatchEvent::Summary(&summary));
        info!(polls = summary.polls, tweets = summary.tweets_seen, "Watch stopped");
        Ok(summary)
    }

    async fn resolve(&self, usernames: &[String]) -> Result<Vec<WatchTarget>, WatchError> {
        if usernames.is_empty() {
            return Err(WatchError::NoTargets);
        }

        let mut targets = Vec::with_capacity(usernames.len());
        for raw in usernames {
            let username = strip_at(raw).to_string();
            let user_id = self
                .api
                .lookup_user(&username)
                .await
                .map_err(|source| WatchError::Resolve {
                    username: username.clone(),
                    source,
                })?;
            debug!(%username, %user_id, "Resolved target");
            targets.push(WatchTarget::new(username, user_id));
        }
        Ok(targets)
    }

    /// Sets the cursor from the newest recent tweet without emitting anything.
    async fn seed(&self, target: &mut WatchTarget) {
        match self.api.timeline(&target.user_id, SEED_PAGE_SIZE, None).await {
            Ok(envelope) => {
                if let Some(newest) = newest_id(envelope.tweets()) {
                    target.advance(newest);
                }
            }
            Err(e) => debug!(username = %target.username, error = %e, "Seeding failed"),
        }
    }

    async fn poll_loop(
        &self,
        targets: &mut [WatchTarget],
        stats: &mut WatchStats,
        sink: &mut dyn WatchSink,
    ) {
        loop {
            for target in targets.iter_mut() {
                if self.cancel.is_cancelled() {
                    return;
                }

                let result = self
                    .api
                    .timeline(
                        &target.user_id,
                        self.options.page_size,
                        target.last_seen_id.as_deref(),
                    )
                    .await;

                match result {
                    Ok(envelope) => {
                        if self.process(target, envelope, stats, sink).await == Flow::Stop {
                            return;
                        }
                    }
                    Err(FetchError::RateLimited(signal)) => {
                        let wait = self.backoff.wait_for(&signal, self.clock.now_unix());
                        warn!(
                            username = %target.username,
                            reset_at = signal.reset_label(),
                            wait_secs = wait.as_secs(),
                            "Rate limited"
                        );
                        sink.on_event(WatchEvent::RateLimited {
                            username: &target.username,
                            wait,
                        });
                        if self.sleep(wait).await == Flow::Stop {
                            return;
                        }
                    }
                    Err(error) => {
                        debug!(username = %target.username, %error, "Poll failed");
                        sink.on_event(WatchEvent::TargetFailed {
                            username: &target.username,
                            error: &error,
                        });
                    }
                }
            }

            stats.polls += 1;

            if self.sleep(self.options.interval).await == Flow::Stop {
                return;
            }
        }
    }

    /// Emits the page oldest-first, then moves the cursor to its newest ID.
    async fn process(
        &self,
        target: &mut WatchTarget,
        envelope: Envelope,
        stats: &mut WatchStats,
        sink: &mut dyn WatchSink,
    ) -> Flow {
        let Envelope { data, includes, .. } = envelope;
        let tweets = match data {
            Some(Data::Tweets(tweets)) => tweets,
            Some(Data::Tweet(tweet)) => vec![tweet],
            _ => return Flow::Continue,
        };

        let newest = newest_id(&tweets).map(str::to_owned);

        for mut tweet in tweets.into_iter().rev() {
            let text = tweet.display_text().to_string();
            if !self.filter.matches(&text) {
                continue;
            }
            tweet.text.clone_from(&text);

            let single = Envelope::single_tweet(tweet, includes.clone());
            sink.on_event(WatchEvent::Tweet {
                username: &target.username,
                envelope: &single,
            });

            if let Some(notifier) = &self.notifier {
                notifier.notify(&target.username, &text).await;
            }

            stats.record(&target.username);

            let max = self.options.max_tweets;
            if max > 0 && stats.tweets_seen >= max {
                sink.on_event(WatchEvent::MaxReached { max });
                return Flow::Stop;
            }
        }

        if let Some(newest) = newest {
            target.advance(&newest);
        }
        Flow::Continue
    }

    /// Sleeps for `duration` unless cancelled first.
    async fn sleep(&self, duration: Duration) -> Flow {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Flow::Stop,
            () = tokio::time::sleep(duration) => Flow::Continue,
        }
    }
}

fn newest_id(tweets: &[Tweet]) -> Option<&str> {
    tweets
        .iter()
        .map(|t| t.id.as_str())
        .max_by(|a, b| cmp_ids(a, b))
        .filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_id_is_numeric_max() {
        let tweets = vec![Tweet::new("99", "a"), Tweet::new("100", "b"), Tweet::new("98", "c")];
        assert_eq!(newest_id(&tweets), Some("100"));
        assert_eq!(newest_id(&[]), None);
    }

    #[test]
    fn test_default_options() {
        let options = WatchOptions::default();
        assert_eq!(options.interval, Duration::from_secs(60));
        assert_eq!(options.page_size, 10);
        assert_eq!(options.max_tweets, 0);
        assert!(options.filters.is_empty());
    }
}
