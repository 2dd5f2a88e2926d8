//! Trait definitions for x-cli.
//!
//! Wall-clock time is read through [`Clock`] so that request signing and
//! rate-limit backoff can be tested against fixed instants.

/// Source of the current Unix time in seconds.
pub trait Clock: Send + Sync {
    /// Returns seconds since the Unix epoch.
    fn now_unix(&self) -> i64;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// A clock frozen at a given Unix timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_unix(&self) -> i64 {
        self.0
    }
}
