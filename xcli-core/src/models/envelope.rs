//! The `{data, includes, meta}` response envelope.
//!
//! Every v2 endpoint wraps its payload the same way. The payload itself is
//! one of a handful of shapes, modelled as the untagged [`Data`] union so a
//! response that matches none of them fails to decode instead of yielding
//! empty lookups.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::tweet::Tweet;
use super::user::User;

// ============================================================================
// Envelope
// ============================================================================

/// A decoded API response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Primary payload. `null` and a missing key both decode to `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Data>,

    /// Expanded objects referenced from `data`.
    #[serde(default, skip_serializing_if = "Includes::is_empty")]
    pub includes: Includes,

    /// Paging metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    /// Partial errors reported alongside (or instead of) `data`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ApiErrorDetail>,
}

impl Envelope {
    /// Builds a single-tweet envelope carrying the given expansions.
    pub fn single_tweet(tweet: Tweet, includes: Includes) -> Self {
        Self {
            data: Some(Data::Tweet(tweet)),
            includes,
            meta: None,
            errors: Vec::new(),
        }
    }

    /// Returns the tweets in the payload, in API order.
    ///
    /// A single tweet is returned as a one-element slice; user and action
    /// payloads yield an empty slice.
    pub fn tweets(&self) -> &[Tweet] {
        match &self.data {
            Some(Data::Tweets(tweets)) => tweets,
            Some(Data::Tweet(tweet)) => std::slice::from_ref(tweet),
            _ => &[],
        }
    }

    /// Returns the single user in the payload, if that is its shape.
    pub fn user(&self) -> Option<&User> {
        match &self.data {
            Some(Data::User(user)) => Some(user),
            _ => None,
        }
    }

    /// Returns the pagination token for the next page.
    pub fn next_token(&self) -> Option<&str> {
        self.meta.as_ref()?.next_token.as_deref()
    }
}

// ============================================================================
// Data Union
// ============================================================================

/// The payload shapes an envelope can carry.
///
/// Variant order matters: tweets require `text` and users require
/// `username`, so each object shape matches exactly one variant before
/// falling through to [`Data::Action`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Data {
    /// A list of tweets (timelines, search, mentions, bookmarks).
    Tweets(Vec<Tweet>),
    /// A list of users (followers, following).
    Users(Vec<User>),
    /// A single tweet.
    Tweet(Tweet),
    /// A single user.
    User(User),
    /// The result of a write action, e.g. `{"liked": true}`.
    Action(ActionResult),
}

/// Free-form result of a write action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionResult(pub Map<String, Value>);

impl ActionResult {
    /// Returns the boolean flag stored under `key`, e.g. `liked`.
    pub fn flag(&self, key: &str) -> Option<bool> {
        self.0.get(key)?.as_bool()
    }
}

// ============================================================================
// Includes / Meta / Errors
// ============================================================================

/// Objects expanded via the `expansions` query parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Includes {
    /// Expanded users (authors, mentioned users).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<User>,

    /// Expanded media attachments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<Media>,

    /// Expanded referenced tweets.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tweets: Vec<Tweet>,

    /// Expansions not modelled above (places, polls, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Includes {
    /// Returns true if nothing was expanded.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.media.is_empty() && self.tweets.is_empty() && self.extra.is_empty()
    }

    /// Looks up an expanded user by ID.
    pub fn find_user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }
}

/// An expanded media object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    /// Media key referenced from `attachments.media_keys`.
    pub media_key: String,

    /// `photo`, `video`, or `animated_gif`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,

    /// Direct URL (photos).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Preview image (videos, gifs).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_image_url: Option<String>,

    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Paging metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    /// Token for the next page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,

    /// Number of results in this page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_count: Option<u64>,

    /// Newest ID in this page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub newest_id: Option<String>,

    /// Oldest ID in this page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oldest_id: Option<String>,

    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of the `errors` array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    /// Long human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Short message (v1.1-style errors).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Error title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Problem type URI.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,

    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiErrorDetail {
    /// Returns the most descriptive non-empty message: `detail`, then `message`.
    pub fn best_message(&self) -> Option<&str> {
        self.detail
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.message.as_deref().filter(|s| !s.is_empty()))
    }
}
