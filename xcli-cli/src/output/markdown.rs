//! Markdown output formatting.

use std::fmt::Write as _;
use xcli_core::{ActionResult, Data, Envelope, Tweet, User};

use super::human::article_preview;
use super::{author_label, cell, format_metric, format_number, metric_label, truncate};

/// Markdown formatter.
pub struct MarkdownFormatter {
    verbose: bool,
}

impl MarkdownFormatter {
    /// Creates a new markdown formatter.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Formats an envelope.
    pub fn format(&self, envelope: &Envelope, title: &str) -> String {
        let mut out = match &envelope.data {
            Some(Data::Tweet(tweet)) => self.format_tweet(envelope, tweet, title),
            Some(Data::Tweets(tweets)) => {
                let items: Vec<String> = tweets.iter().map(|t| self.format_tweet(envelope, t, "")).collect();
                heading(title) + &items.join("\n---\n")
            }
            Some(Data::User(user)) => self.format_user(user),
            Some(Data::Users(users)) => heading(title) + &self.format_user_table(users),
            Some(Data::Action(action)) => format_action(action, title),
            None => String::new(),
        };

        if self.verbose {
            if let Some(token) = envelope.next_token() {
                let _ = writeln!(out, "\n*Next page: `--next-token {token}`*");
            }
        }
        out
    }

    fn format_tweet(&self, envelope: &Envelope, tweet: &Tweet, title: &str) -> String {
        let mut out = heading(title);

        let _ = write!(out, "**{}**", author_label(envelope, tweet.author_id.as_deref()));
        if self.verbose {
            if let Some(created) = &tweet.created_at {
                let _ = write!(out, " *{created}*");
            }
        }
        let _ = write!(out, "\n\n{}\n\n", tweet.display_text());

        if let Some(article) = &tweet.article {
            let _ = write!(out, "### Article: {}\n\n", article.title.as_deref().unwrap_or_default());
            if let Some(body) = article.plain_text.as_deref().filter(|b| !b.is_empty()) {
                let total = u64::try_from(body.chars().count()).unwrap_or(u64::MAX);
                let _ = write!(
                    out,
                    "{}\n\n*({} chars total)*\n\n",
                    article_preview(body),
                    format_number(total)
                );
            }
        }

        if self.verbose {
            if let Some(metrics) = tweet.public_metrics.as_ref().filter(|m| !m.is_empty()) {
                let line: Vec<String> = metrics
                    .iter()
                    .map(|(k, v)| format!("{}: {}", metric_label(k), format_metric(v)))
                    .collect();
                let _ = write!(out, "{}\n\n", line.join(" | "));
            }
        }

        let _ = writeln!(out, "ID: `{}`", tweet.id);
        out
    }

    fn format_user(&self, user: &User) -> String {
        let mut out = format!("## {} (@{})\n\n", user.name, user.username);

        if let Some(desc) = user.description.as_deref().filter(|d| !d.is_empty()) {
            let _ = write!(out, "{desc}\n\n");
        }

        if let Some(metrics) = user.public_metrics.as_ref().filter(|m| !m.is_empty()) {
            let line: Vec<String> = metrics
                .iter()
                .map(|(k, v)| format!("**{}**: {}", metric_label(k), format_metric(v)))
                .collect();
            let _ = write!(out, "{}\n\n", line.join(" | "));
        }

        if self.verbose {
            if let Some(location) = user.location.as_deref().filter(|l| !l.is_empty()) {
                let _ = writeln!(out, "Location: {location}");
            }
            if let Some(joined) = &user.created_at {
                let _ = writeln!(out, "Joined: {joined}");
            }
        }
        out
    }

    fn format_user_table(&self, users: &[User]) -> String {
        let mut out = if self.verbose {
            "| Username | Name | Followers | Description |\n|---|---|---|---|\n".to_string()
        } else {
            "| Username | Name | Followers |\n|---|---|---|\n".to_string()
        };

        for user in users {
            let followers = user.metric("followers_count").map(format_number).unwrap_or_default();
            let _ = write!(out, "| @{} | {} | {} |", user.username, escape_cell(&user.name), followers);
            if self.verbose {
                let desc = truncate(user.description.as_deref().unwrap_or_default(), 60);
                let _ = write!(out, " {} |", escape_cell(&desc));
            }
            out.push('\n');
        }
        out
    }
}

fn heading(title: &str) -> String {
    if title.is_empty() {
        String::new()
    } else {
        format!("## {title}\n\n")
    }
}

fn format_action(action: &ActionResult, title: &str) -> String {
    let pairs: Vec<String> = action.0.iter().map(|(k, v)| format!("{k}={}", cell(v))).collect();
    format!("**{title}**: {}\n", pairs.join(", "))
}

/// Keeps a value inside one table cell.
fn escape_cell(text: &str) -> String {
    text.replace('|', "/").replace('\n', " ")
}
