//! Tweet objects.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

// ============================================================================
// Tweet
// ============================================================================

/// A tweet as returned by the v2 API.
///
/// Only the fields x-cli interprets are typed; everything else the API sends
/// is kept in [`Tweet::extra`] so JSON output stays faithful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tweet {
    /// Tweet ID (decimal string).
    pub id: String,

    /// Tweet text, truncated by the API for long posts.
    pub text: String,

    /// Author user ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,

    /// Creation timestamp (ISO 8601).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Conversation (thread root) ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,

    /// Extended text for long posts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_tweet: Option<NoteTweet>,

    /// Long-form article attached to the tweet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article: Option<Article>,

    /// Public engagement counters (`like_count`, `retweet_count`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_metrics: Option<BTreeMap<String, Value>>,

    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Tweet {
    /// Creates a tweet with just an ID and text.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            author_id: None,
            created_at: None,
            conversation_id: None,
            note_tweet: None,
            article: None,
            public_metrics: None,
            extra: Map::new(),
        }
    }

    /// Returns the full text, preferring the extended note text when present.
    pub fn display_text(&self) -> &str {
        self.note_tweet
            .as_ref()
            .and_then(|n| n.text.as_deref())
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.text)
    }
}

// ============================================================================
// Extended Payloads
// ============================================================================

/// Extended text payload for posts longer than the classic limit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteTweet {
    /// Full text of the post.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A long-form article attached to a tweet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Article title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Article body as plain text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plain_text: Option<String>,

    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================================================
// Tests
// ============================================================================
