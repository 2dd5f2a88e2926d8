//! Plain output: tab-separated values for piping into `cut` and friends.

use serde_json::{Map, Value};
use xcli_core::{Data, Envelope};

use super::cell;

/// Keys left out of single-object output unless verbose.
const NOISY_KEYS: &[&str] = &[
    "public_metrics",
    "entities",
    "edit_history_tweet_ids",
    "attachments",
    "referenced_tweets",
    "profile_image_url",
];

/// Preferred columns for user lists.
const USER_COLUMNS: &[&str] = &["username", "name", "description"];

/// Preferred columns for tweet lists.
const TWEET_COLUMNS: &[&str] = &["id", "author_id", "text", "created_at"];

/// TSV formatter.
pub struct PlainFormatter {
    verbose: bool,
}

impl PlainFormatter {
    /// Creates a new plain formatter.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Formats an envelope: `key<TAB>value` lines for one object, a header
    /// row plus data rows for a list.
    pub fn format(&self, envelope: &Envelope) -> String {
        let Some(data) = &envelope.data else {
            return String::new();
        };
        let preferred = match data {
            Data::Users(_) => USER_COLUMNS,
            _ => TWEET_COLUMNS,
        };
        match serde_json::to_value(data) {
            Ok(Value::Array(items)) => self.format_list(&items, preferred),
            Ok(Value::Object(object)) => self.format_object(&object),
            Ok(other) => format!("{}\n", cell(&other)),
            Err(_) => String::new(),
        }
    }

    fn format_object(&self, object: &Map<String, Value>) -> String {
        object
            .iter()
            .filter(|(k, _)| self.verbose || !NOISY_KEYS.contains(&k.as_str()))
            .map(|(k, v)| format!("{k}\t{}\n", tsv_field(v)))
            .collect()
    }

    fn format_list(&self, items: &[Value], preferred: &[&str]) -> String {
        let Some(Value::Object(first)) = items.first() else {
            return String::new();
        };

        let mut columns: Vec<&str> = if self.verbose {
            Vec::new()
        } else {
            preferred.iter().copied().filter(|c| first.contains_key(*c)).collect()
        };
        if columns.is_empty() {
            columns = first.keys().map(String::as_str).collect();
        }

        let mut out = columns.join("\t");
        out.push('\n');
        for item in items {
            let row: Vec<String> = columns
                .iter()
                .map(|c| item.get(*c).map(tsv_field).unwrap_or_default())
                .collect();
            out.push_str(&row.join("\t"));
            out.push('\n');
        }
        out
    }
}

/// A cell with tabs and newlines flattened so rows stay one line.
fn tsv_field(value: &Value) -> String {
    cell(value).replace(['\t', '\n', '\r'], " ")
}
