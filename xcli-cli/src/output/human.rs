//! Human-readable output: bordered panels for single objects, a table for
//! user lists.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use xcli_core::{Article, Data, Envelope, Tweet, User};

use super::style::Style;
use super::{RenderOptions, Rendered, author_label, format_metric, format_number, metric_label, truncate};

/// Minimum panel border width.
const PANEL_WIDTH: usize = 60;

/// Characters of article body shown before the cut.
const ARTICLE_PREVIEW_CHARS: usize = 500;

/// Human formatter with optional colors.
pub struct HumanFormatter {
    style: Style,
    verbose: bool,
}

impl HumanFormatter {
    /// Creates a new human formatter.
    pub fn new(opts: RenderOptions) -> Self {
        Self {
            style: Style::new(opts.use_colors),
            verbose: opts.verbose,
        }
    }

    /// Formats an envelope. The paging hint goes to stderr.
    pub fn format(&self, envelope: &Envelope, title: &str) -> Rendered {
        let mut out = String::new();
        match &envelope.data {
            Some(Data::Tweet(tweet)) => out.push_str(&self.format_tweet(envelope, tweet, title)),
            Some(Data::Tweets(tweets)) => {
                for tweet in tweets {
                    out.push_str(&self.format_tweet(envelope, tweet, ""));
                }
            }
            Some(Data::User(user)) => out.push_str(&self.format_user(user, title)),
            Some(Data::Users(users)) => out.push_str(&self.format_user_table(users, title)),
            Some(Data::Action(action)) => {
                let body = serde_json::to_string_pretty(&action.0).unwrap_or_default();
                let _ = writeln!(out, "{body}");
            }
            None => {}
        }

        let mut stderr = String::new();
        if self.verbose {
            if let Some(token) = envelope.next_token() {
                let _ = writeln!(stderr, "{}", self.style.dim(&format!("Next page: --next-token {token}")));
            }
        }

        Rendered { stdout: out, stderr }
    }

    /// Formats one tweet as a blue-bordered panel.
    pub fn format_tweet(&self, envelope: &Envelope, tweet: &Tweet, title: &str) -> String {
        let title = if title.is_empty() {
            format!("Tweet {}", tweet.id)
        } else {
            title.to_string()
        };
        let border = self
            .style
            .blue(&"─".repeat((title.chars().count() + 4).max(PANEL_WIDTH)));

        let mut lines = vec![border.clone(), format!(" {}", self.style.bold(&title)), border.clone()];

        let author = author_label(envelope, tweet.author_id.as_deref());
        let mut header = format!(" {}", self.style.bold(&author));
        if self.verbose {
            if let Some(created) = &tweet.created_at {
                let _ = write!(header, "  {}", self.style.dim(created));
            }
        }
        lines.push(header);
        lines.push(String::new());
        lines.push(format!(" {}", tweet.display_text()));

        if let Some(article) = &tweet.article {
            lines.push(String::new());
            lines.extend(self.format_article(article));
        }

        if self.verbose {
            if let Some(metrics) = tweet.public_metrics.as_ref().filter(|m| !m.is_empty()) {
                lines.push(String::new());
                lines.push(format!(" {}", self.style.dim(&metrics_line(metrics))));
            }
        }

        lines.push(border);
        lines.join("\n") + "\n"
    }

    fn format_article(&self, article: &Article) -> Vec<String> {
        let title = article.title.as_deref().unwrap_or_default();
        let mut lines = vec![format!(" {}", self.style.bold(&format!("Article: {title}")))];
        if let Some(body) = article.plain_text.as_deref().filter(|b| !b.is_empty()) {
            lines.push(format!(" {}", article_preview(body)));
            let total = u64::try_from(body.chars().count()).unwrap_or(u64::MAX);
            lines.push(format!(
                " {}",
                self.style.dim(&format!("({} chars total)", format_number(total)))
            ));
        }
        lines
    }

    /// Formats one user as a green-bordered panel.
    pub fn format_user(&self, user: &User, title: &str) -> String {
        let heading = if title.is_empty() {
            format!("@{}", user.username)
        } else {
            title.to_string()
        };
        let border = self
            .style
            .green(&"─".repeat((user.username.chars().count() + 6).max(PANEL_WIDTH)));

        let mut lines = vec![border.clone(), format!(" {}", self.style.bold(&heading)), border.clone()];

        let mut name = format!(" {} @{}", self.style.bold(&user.name), user.username);
        if user.is_verified() {
            let _ = write!(name, " {}", self.style.blue("verified"));
        }
        lines.push(name);

        if let Some(desc) = user.description.as_deref().filter(|d| !d.is_empty()) {
            lines.push(format!(" {desc}"));
        }

        if self.verbose {
            if let Some(location) = user.location.as_deref().filter(|l| !l.is_empty()) {
                lines.push(format!(" Location: {location}"));
            }
            if let Some(joined) = &user.created_at {
                lines.push(format!(" Joined: {joined}"));
            }
        }

        if let Some(metrics) = user.public_metrics.as_ref().filter(|m| !m.is_empty()) {
            lines.push(format!(" {}", metrics_line(metrics)));
        }

        lines.push(border);
        lines.join("\n") + "\n"
    }

    /// Formats a user list as a fixed-width table.
    pub fn format_user_table(&self, users: &[User], title: &str) -> String {
        let mut header = format!("{:<20} {:<25} {:>12}", "USERNAME", "NAME", "FOLLOWERS");
        if self.verbose {
            let _ = write!(header, "  {:<50}", "DESCRIPTION");
        }
        let rule = "-".repeat(header.chars().count());

        let mut lines = Vec::with_capacity(users.len() + 4);
        if !title.is_empty() {
            lines.push(self.style.bold(title));
            lines.push(String::new());
        }
        lines.push(self.style.bold(&header));
        lines.push(rule);

        for user in users {
            let followers = user.metric("followers_count").map(format_number).unwrap_or_default();
            let mut row = format!(
                "{:<20} {:<25} {:>12}",
                truncate(&format!("@{}", user.username), 20),
                truncate(&user.name, 25),
                followers
            );
            if self.verbose {
                let desc = user.description.as_deref().unwrap_or_default().replace('\n', " ");
                let _ = write!(row, "  {:<50}", truncate(&desc, 50));
            }
            lines.push(row.trim_end().to_string());
        }

        lines.join("\n") + "\n"
    }
}

/// Joins metrics as `label: value | label: value`.
fn metrics_line(metrics: &BTreeMap<String, Value>) -> String {
    metrics
        .iter()
        .map(|(k, v)| format!("{}: {}", metric_label(k), format_metric(v)))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// First part of an article body, with `...` when it was cut.
pub(super) fn article_preview(body: &str) -> String {
    if body.chars().count() <= ARTICLE_PREVIEW_CHARS {
        return body.to_string();
    }
    let mut preview: String = body.chars().take(ARTICLE_PREVIEW_CHARS).collect();
    preview.push_str("...");
    preview
}
