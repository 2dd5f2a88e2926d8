//! One request builder per API endpoint.
//!
//! Each builder fixes the field lists and expansions the renderers rely on,
//! clamps `max_results` to what the endpoint accepts, and picks bearer or
//! OAuth authentication.

use reqwest::Method;
use serde_json::{Value, json};
use url::form_urlencoded;

use xcli_core::Envelope;

use crate::client::ApiClient;
use crate::error::FetchError;
use crate::oauth::percent_encode;
use crate::transport::Transport;

// ============================================================================
// Field Lists
// ============================================================================

const TWEET_FIELDS_FULL: &str = "created_at,public_metrics,author_id,conversation_id,in_reply_to_user_id,referenced_tweets,attachments,entities,lang,note_tweet,article";
const TWEET_FIELDS_LIST: &str = "created_at,public_metrics,author_id,conversation_id,entities,lang,note_tweet";
const TWEET_FIELDS_MENTIONS: &str = "created_at,public_metrics,author_id,conversation_id,entities,note_tweet";
const TWEET_FIELDS_METRICS: &str = "public_metrics,non_public_metrics,organic_metrics";

const USER_FIELDS_PROFILE: &str = "created_at,description,public_metrics,verified,profile_image_url,url,location,pinned_tweet_id";
const USER_FIELDS_LIST: &str = "created_at,description,public_metrics,verified,profile_image_url";
const USER_FIELDS_AUTHOR: &str = "name,username,verified,profile_image_url";
const USER_FIELDS_AUTHOR_METRICS: &str = "name,username,verified,profile_image_url,public_metrics";
const USER_FIELDS_BRIEF: &str = "name,username,verified";

const MEDIA_FIELDS_FULL: &str = "url,preview_image_url,type,width,height,alt_text";
const MEDIA_FIELDS: &str = "url,preview_image_url,type";

/// A poll attached to a new tweet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSpec {
    /// Between two and four answer options.
    pub options: Vec<String>,
    /// How long the poll stays open.
    pub duration_minutes: u32,
}

/// Appends `params` as a query string, keys sorted.
fn with_query(url: String, params: &[(&str, String)]) -> String {
    let mut sorted: Vec<&(&str, String)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in sorted {
        serializer.append_pair(key, value);
    }
    format!("{url}?{}", serializer.finish())
}

fn tweet_id_body(tweet_id: &str) -> Value {
    json!({ "tweet_id": tweet_id })
}

// ============================================================================
// Endpoints
// ============================================================================

impl<T: Transport> ApiClient<T> {
    // ---- tweets ----

    /// `POST /tweets`.
    ///
    /// # Errors
    ///
    /// Returns the classified gateway error.
    pub async fn post_tweet(
        &self,
        text: &str,
        reply_to: Option<&str>,
        quote_tweet_id: Option<&str>,
        poll: Option<&PollSpec>,
    ) -> Result<Envelope, FetchError> {
        let mut body = json!({ "text": text });
        if let Some(reply_to) = reply_to {
            body["reply"] = json!({ "in_reply_to_tweet_id": reply_to });
        }
        if let Some(quote) = quote_tweet_id {
            body["quote_tweet_id"] = json!(quote);
        }
        if let Some(poll) = poll.filter(|p| !p.options.is_empty()) {
            body["poll"] = json!({
                "options": poll.options,
                "duration_minutes": poll.duration_minutes,
            });
        }
        self.signed_request(Method::POST, &self.endpoint("tweets"), Some(&body))
            .await
    }

    /// `DELETE /tweets/{id}`.
    ///
    /// # Errors
    ///
    /// Returns the classified gateway error.
    pub async fn delete_tweet(&self, tweet_id: &str) -> Result<Envelope, FetchError> {
        let url = self.endpoint(&format!("tweets/{}", percent_encode(tweet_id)));
        self.signed_request(Method::DELETE, &url, None).await
    }

    /// `GET /tweets/{id}` with full fields and expansions.
    ///
    /// # Errors
    ///
    /// Returns the classified gateway error.
    pub async fn get_tweet(&self, tweet_id: &str) -> Result<Envelope, FetchError> {
        let url = with_query(
            self.endpoint(&format!("tweets/{}", percent_encode(tweet_id))),
            &[
                ("tweet.fields", TWEET_FIELDS_FULL.to_string()),
                ("expansions", "author_id,referenced_tweets.id,attachments.media_keys".to_string()),
                ("user.fields", USER_FIELDS_AUTHOR_METRICS.to_string()),
                ("media.fields", MEDIA_FIELDS_FULL.to_string()),
            ],
        );
        self.bearer_get(&url).await
    }

    /// `GET /tweets/search/recent`. `max_results` is clamped to 10..=100.
    ///
    /// # Errors
    ///
    /// Returns the classified gateway error.
    pub async fn search_tweets(&self, query: &str, max_results: u32) -> Result<Envelope, FetchError> {
        let url = with_query(
            self.endpoint("tweets/search/recent"),
            &[
                ("query", query.to_string()),
                ("max_results", max_results.clamp(10, 100).to_string()),
                ("tweet.fields", TWEET_FIELDS_LIST.to_string()),
                ("expansions", "author_id,attachments.media_keys".to_string()),
                ("user.fields", USER_FIELDS_AUTHOR.to_string()),
                ("media.fields", MEDIA_FIELDS.to_string()),
            ],
        );
        self.bearer_get(&url).await
    }

    /// `GET /tweets/{id}` with owner-only metrics (OAuth).
    ///
    /// # Errors
    ///
    /// Returns the classified gateway error.
    pub async fn get_tweet_metrics(&self, tweet_id: &str) -> Result<Envelope, FetchError> {
        let url = with_query(
            self.endpoint(&format!("tweets/{}", percent_encode(tweet_id))),
            &[("tweet.fields", TWEET_FIELDS_METRICS.to_string())],
        );
        self.signed_request(Method::GET, &url, None).await
    }

    // ---- users ----

    /// `GET /users/by/username/{username}`.
    ///
    /// # Errors
    ///
    /// Returns the classified gateway error.
    pub async fn get_user(&self, username: &str) -> Result<Envelope, FetchError> {
        let url = with_query(
            self.endpoint(&format!("users/by/username/{}", percent_encode(username))),
            &[("user.fields", USER_FIELDS_PROFILE.to_string())],
        );
        self.bearer_get(&url).await
    }

    /// `GET /users/{id}/tweets`. `max_results` is clamped to 5..=100.
    ///
    /// # Errors
    ///
    /// Returns the classified gateway error.
    pub async fn get_timeline(
        &self,
        user_id: &str,
        max_results: u32,
        since_id: Option<&str>,
    ) -> Result<Envelope, FetchError> {
        let mut params = vec![
            ("max_results", max_results.clamp(5, 100).to_string()),
            ("tweet.fields", TWEET_FIELDS_LIST.to_string()),
            ("expansions", "author_id,attachments.media_keys,referenced_tweets.id".to_string()),
            ("user.fields", USER_FIELDS_BRIEF.to_string()),
            ("media.fields", MEDIA_FIELDS.to_string()),
        ];
        if let Some(since_id) = since_id.filter(|s| !s.is_empty()) {
            params.push(("since_id", since_id.to_string()));
        }
        let url = with_query(
            self.endpoint(&format!("users/{}/tweets", percent_encode(user_id))),
            &params,
        );
        self.bearer_get(&url).await
    }

    /// `GET /users/{id}/followers`. `max_results` is clamped to 1..=1000.
    ///
    /// # Errors
    ///
    /// Returns the classified gateway error.
    pub async fn get_followers(&self, user_id: &str, max_results: u32) -> Result<Envelope, FetchError> {
        self.user_list(user_id, "followers", max_results).await
    }

    /// `GET /users/{id}/following`. `max_results` is clamped to 1..=1000.
    ///
    /// # Errors
    ///
    /// Returns the classified gateway error.
    pub async fn get_following(&self, user_id: &str, max_results: u32) -> Result<Envelope, FetchError> {
        self.user_list(user_id, "following", max_results).await
    }

    async fn user_list(&self, user_id: &str, relation: &str, max_results: u32) -> Result<Envelope, FetchError> {
        let url = with_query(
            self.endpoint(&format!("users/{}/{relation}", percent_encode(user_id))),
            &[
                ("max_results", max_results.clamp(1, 1000).to_string()),
                ("user.fields", USER_FIELDS_LIST.to_string()),
            ],
        );
        self.bearer_get(&url).await
    }

    // ---- authenticated user ----

    /// `GET /users/{me}/mentions`. `max_results` is clamped to 5..=100.
    ///
    /// # Errors
    ///
    /// Returns the classified gateway error, including a failed user lookup.
    pub async fn get_mentions(&self, max_results: u32) -> Result<Envelope, FetchError> {
        let me = self.authenticated_user_id().await?;
        let url = with_query(
            self.endpoint(&format!("users/{me}/mentions")),
            &[
                ("max_results", max_results.clamp(5, 100).to_string()),
                ("tweet.fields", TWEET_FIELDS_MENTIONS.to_string()),
                ("expansions", "author_id".to_string()),
                ("user.fields", USER_FIELDS_BRIEF.to_string()),
            ],
        );
        self.signed_request(Method::GET, &url, None).await
    }

    /// `GET /users/{me}/bookmarks`. `max_results` is clamped to 1..=100.
    ///
    /// # Errors
    ///
    /// Returns the classified gateway error, including a failed user lookup.
    pub async fn get_bookmarks(&self, max_results: u32) -> Result<Envelope, FetchError> {
        let me = self.authenticated_user_id().await?;
        let url = with_query(
            self.endpoint(&format!("users/{me}/bookmarks")),
            &[
                ("max_results", max_results.clamp(1, 100).to_string()),
                ("tweet.fields", TWEET_FIELDS_LIST.to_string()),
                ("expansions", "author_id,attachments.media_keys".to_string()),
                ("user.fields", USER_FIELDS_AUTHOR.to_string()),
                ("media.fields", MEDIA_FIELDS.to_string()),
            ],
        );
        self.signed_request(Method::GET, &url, None).await
    }

    /// `POST /users/{me}/likes`.
    ///
    /// # Errors
    ///
    /// Returns the classified gateway error, including a failed user lookup.
    pub async fn like_tweet(&self, tweet_id: &str) -> Result<Envelope, FetchError> {
        self.add_relation("likes", tweet_id).await
    }

    /// `DELETE /users/{me}/likes/{id}`.
    ///
    /// # Errors
    ///
    /// Returns the classified gateway error, including a failed user lookup.
    pub async fn unlike_tweet(&self, tweet_id: &str) -> Result<Envelope, FetchError> {
        self.remove_relation("likes", tweet_id).await
    }

    /// `POST /users/{me}/retweets`.
    ///
    /// # Errors
    ///
    /// Returns the classified gateway error, including a failed user lookup.
    pub async fn retweet(&self, tweet_id: &str) -> Result<Envelope, FetchError> {
        self.add_relation("retweets", tweet_id).await
    }

    /// `DELETE /users/{me}/retweets/{id}`.
    ///
    /// # Errors
    ///
    /// Returns the classified gateway error, including a failed user lookup.
    pub async fn unretweet(&self, tweet_id: &str) -> Result<Envelope, FetchError> {
        self.remove_relation("retweets", tweet_id).await
    }

    /// `POST /users/{me}/bookmarks`.
    ///
    /// # Errors
    ///
    /// Returns the classified gateway error, including a failed user lookup.
    pub async fn bookmark_tweet(&self, tweet_id: &str) -> Result<Envelope, FetchError> {
        self.add_relation("bookmarks", tweet_id).await
    }

    /// `DELETE /users/{me}/bookmarks/{id}`.
    ///
    /// # Errors
    ///
    /// Returns the classified gateway error, including a failed user lookup.
    pub async fn unbookmark_tweet(&self, tweet_id: &str) -> Result<Envelope, FetchError> {
        self.remove_relation("bookmarks", tweet_id).await
    }

    async fn add_relation(&self, relation: &str, tweet_id: &str) -> Result<Envelope, FetchError> {
        let me = self.authenticated_user_id().await?;
        let url = self.endpoint(&format!("users/{me}/{relation}"));
        self.signed_request(Method::POST, &url, Some(&tweet_id_body(tweet_id)))
            .await
    }

    async fn remove_relation(&self, relation: &str, tweet_id: &str) -> Result<Envelope, FetchError> {
        let me = self.authenticated_user_id().await?;
        let url = self.endpoint(&format!("users/{me}/{relation}/{}", percent_encode(tweet_id)));
        self.signed_request(Method::DELETE, &url, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_query_sorts_and_encodes() {
        let url = with_query(
            "https://api.x.com/2/tweets/search/recent".to_string(),
            &[
                ("query", "rust lang".to_string()),
                ("max_results", "10".to_string()),
                ("expansions", "author_id,attachments.media_keys".to_string()),
            ],
        );
        assert_eq!(
            url,
            "https://api.x.com/2/tweets/search/recent?expansions=author_id%2Cattachments.media_keys&max_results=10&query=rust+lang"
        );
    }

    #[test]
    fn test_tweet_id_body() {
        assert_eq!(tweet_id_body("42"), json!({"tweet_id": "42"}));
    }
}
