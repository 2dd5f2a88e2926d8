//! JSON output formatting.

use anyhow::Result;
use xcli_core::Envelope;

/// Pretty-printed JSON with two-space indentation.
pub struct JsonFormatter {
    verbose: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Formats an envelope.
    ///
    /// Only `data` is printed unless verbose mode asks for the whole envelope
    /// (includes, meta, partial errors). An envelope without `data` is always
    /// printed whole.
    pub fn format(&self, envelope: &Envelope) -> Result<String> {
        let text = match &envelope.data {
            Some(data) if !self.verbose => serde_json::to_string_pretty(data)?,
            _ => serde_json::to_string_pretty(envelope)?,
        };
        Ok(text + "\n")
    }

    /// Formats any serializable value the same way.
    pub fn format_value<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)? + "\n")
    }
}
