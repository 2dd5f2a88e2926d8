//! Output formatting for CLI.
//!
//! Every command produces an [`Envelope`]; [`render`] turns it into text for
//! the selected [`OutputMode`]. Formatters return strings so they can be
//! tested without capturing stdout.

mod human;
mod json;
mod markdown;
mod plain;
mod status;
mod style;

pub use human::HumanFormatter;
pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use plain::PlainFormatter;
pub use status::WatchFormatter;

use anyhow::Result;
use serde_json::Value;
use std::io::Write;
use xcli_core::Envelope;


// ============================================================================
// Options
// ============================================================================

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Colored panels and tables.
    #[default]
    Human,
    /// Pretty-printed JSON.
    Json,
    /// Tab-separated values.
    Plain,
    /// Markdown.
    Markdown,
}

/// Settings shared by every formatter.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Emit ANSI colors.
    pub use_colors: bool,
    /// Include timestamps, metrics, and paging hints.
    pub verbose: bool,
}

/// Rendered output, split by destination stream.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Rendered {
    /// Primary output.
    pub stdout: String,
    /// Hints that must not pollute piped output.
    pub stderr: String,
}

impl Rendered {
    /// Output that goes to stdout only.
    pub fn stdout(text: String) -> Self {
        Self {
            stdout: text,
            stderr: String::new(),
        }
    }

    /// Writes both streams.
    pub fn emit(&self) -> Result<()> {
        if !self.stdout.is_empty() {
            let mut out = std::io::stdout().lock();
            out.write_all(self.stdout.as_bytes())?;
            out.flush()?;
        }
        if !self.stderr.is_empty() {
            eprint!("{}", self.stderr);
        }
        Ok(())
    }
}

/// Renders an envelope in the given mode.
///
/// `title` heads single-object panels and lists; an empty title lets each
/// tweet fall back to `Tweet {id}`.
pub fn render(envelope: &Envelope, mode: OutputMode, title: &str, opts: RenderOptions) -> Result<Rendered> {
    match mode {
        OutputMode::Json => Ok(Rendered::stdout(JsonFormatter::new(opts.verbose).format(envelope)?)),
        OutputMode::Plain => Ok(Rendered::stdout(PlainFormatter::new(opts.verbose).format(envelope))),
        OutputMode::Markdown => Ok(Rendered::stdout(
            MarkdownFormatter::new(opts.verbose).format(envelope, title),
        )),
        OutputMode::Human => Ok(HumanFormatter::new(opts).format(envelope, title)),
    }
}

// ============================================================================
// Shared Helpers
// ============================================================================

/// Formats an integer with comma thousands separators.
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Formats a metric value: integers get separators, anything else prints as-is.
pub fn format_metric(value: &Value) -> String {
    match value {
        Value::Number(n) => match (n.as_u64(), n.as_i64()) {
            (Some(u), _) => format_number(u),
            (None, Some(i)) => format!("-{}", format_number(i.unsigned_abs())),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Turns `like_count` into `like` and `quote_tweet_count` into `quote tweet`.
pub fn metric_label(key: &str) -> String {
    key.strip_suffix("_count").unwrap_or(key).replace('_', " ")
}

/// Shortens `text` to at most `max` characters, ending in `...` when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Formats a scalar for a table cell. Nested values become compact JSON.
pub fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Tweet author shown in panels: `@username` when expanded, else the raw ID.
pub fn author_label(envelope: &Envelope, author_id: Option<&str>) -> String {
    match author_id {
        Some(id) => envelope
            .includes
            .find_user(id)
            .map_or_else(|| id.to_string(), |u| format!("@{}", u.username)),
        None => "?".to_string(),
    }
}
