//! Progress lines printed to stderr during `x watch`.

use std::time::Duration;
use xcli_fetch::FetchError;
use xcli_watch::{WatchSummary, WatchTarget};

use super::style::Style;

/// Formats watch session status messages.
pub struct WatchFormatter {
    style: Style,
}

impl WatchFormatter {
    /// Creates a new watch formatter.
    pub fn new(use_colors: bool) -> Self {
        Self {
            style: Style::new(use_colors),
        }
    }

    pub fn initializing(&self) -> String {
        self.style.dim("Initializing watch...")
    }

    pub fn tracking(&self, target: &WatchTarget) -> String {
        self.style
            .dim(&format!("  Tracking @{} (id={})", target.username, target.user_id))
    }

    /// Banner shown once polling starts, followed by a blank line.
    pub fn started(&self, targets: &[WatchTarget], interval: Duration, filters: &[String]) -> String {
        let names: Vec<String> = targets.iter().map(|t| format!("@{}", t.username)).collect();
        let mut out = format!(
            "{}{}\n",
            self.style.bold(&format!("Watching {}", names.join(", "))),
            self.style
                .dim(&format!(" (every {}s, Ctrl+C to stop)", interval.as_secs()))
        );
        if !filters.is_empty() {
            out.push_str(&self.style.dim(&format!("Filters: {}", filters.join(", "))));
            out.push('\n');
        }
        out
    }

    pub fn rate_limited(&self, wait: Duration) -> String {
        self.style
            .yellow(&format!("Rate limited. Waiting {}s...", wait.as_secs()))
    }

    pub fn target_failed(&self, username: &str, error: &FetchError) -> String {
        self.style.red(&format!("Error for @{username}: {error}"))
    }

    pub fn max_reached(&self, max: u64) -> String {
        format!("\nReached --max {max} tweets.")
    }

    pub fn summary(&self, summary: &WatchSummary) -> String {
        let mut lines = vec![
            String::new(),
            self.style.bold("Watch session summary"),
            format!("  Polls: {}", summary.polls),
            format!("  Tweets seen: {}", summary.tweets_seen),
        ];
        for (username, count) in &summary.per_target {
            lines.push(format!("  @{username}: {count} new tweets"));
        }
        lines.join("\n")
    }
}
