//! Gateway behaviour against a scripted in-memory transport.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::HeaderValue;
use serde_json::{Value, json};

use xcli_core::{Credentials, FixedClock};
use xcli_fetch::{
    ApiClient, FetchError, HttpRequest, HttpResponse, OAuthSigner, PollSpec,
    RATE_LIMIT_RESET_HEADER, StaticNonce, Transport,
};

// ============================================================================
// Scripted Transport
// ============================================================================

#[derive(Default)]
struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, FetchError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    fn with(responses: Vec<Result<HttpResponse, FetchError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Transport("script exhausted".to_string())))
    }
}

fn ok(body: Value) -> Result<HttpResponse, FetchError> {
    Ok(HttpResponse::new(200, body.to_string()))
}

fn creds() -> Credentials {
    Credentials::new("ck", "cs", "at", "ats", "bearer-123")
}

fn client(responses: Vec<Result<HttpResponse, FetchError>>) -> ApiClient<ScriptedTransport> {
    ApiClient::with_transport(creds(), ScriptedTransport::with(responses))
        .with_base_url("https://api.test/2")
}

fn me() -> Result<HttpResponse, FetchError> {
    ok(json!({"data": {"id": "777", "name": "Me", "username": "me"}}))
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn test_bearer_get_sends_bearer_token() {
    let client = client(vec![ok(json!({"data": {"id": "1", "text": "hi"}}))]);
    let envelope = client.bearer_get("https://api.test/2/tweets/1").await.unwrap();
    assert_eq!(envelope.tweets()[0].text, "hi");

    let requests = client.transport().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(requests[0].header("authorization"), Some("Bearer bearer-123"));
    assert!(requests[0].body.is_none());
}

#[tokio::test]
async fn test_signed_request_with_body_sets_content_type() {
    let client = client(vec![ok(json!({"data": {"id": "9", "text": "posted"}}))]);
    let body = json!({"text": "posted"});
    client
        .signed_request(Method::POST, "https://api.test/2/tweets", Some(&body))
        .await
        .unwrap();

    let request = &client.transport().requests()[0];
    assert!(request.header("authorization").unwrap().starts_with("OAuth "));
    assert_eq!(request.header("content-type"), Some("application/json"));
    let sent: Value = serde_json::from_slice(request.body.as_ref().unwrap()).unwrap();
    assert_eq!(sent, body);
}

#[tokio::test]
async fn test_signed_request_without_body_has_no_content_type() {
    let client = client(vec![ok(json!({"data": {"deleted": true}}))]);
    let envelope = client.delete_tweet("55").await.unwrap();
    assert!(envelope.tweets().is_empty());

    let request = &client.transport().requests()[0];
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(request.url, "https://api.test/2/tweets/55");
    assert!(request.header("content-type").is_none());
}

#[tokio::test]
async fn test_query_parameters_are_signed() {
    let signer = OAuthSigner::new(&creds())
        .with_clock(Arc::new(FixedClock(1_700_000_000)))
        .with_nonce_source(Arc::new(StaticNonce("abc".to_string())));
    let client = client(vec![ok(json!({})), ok(json!({}))]).with_signer(signer);

    client
        .signed_request(Method::GET, "https://api.test/2/x?since_id=1", None)
        .await
        .unwrap();
    client
        .signed_request(Method::GET, "https://api.test/2/x?since_id=2", None)
        .await
        .unwrap();

    let requests = client.transport().requests();
    assert_ne!(
        requests[0].header("authorization"),
        requests[1].header("authorization")
    );
}

// ============================================================================
// Authenticated User ID
// ============================================================================

#[tokio::test]
async fn test_user_id_is_fetched_once() {
    let client = client(vec![
        me(),
        ok(json!({"data": {"liked": true}})),
        ok(json!({"data": {"liked": false}})),
    ]);

    client.like_tweet("42").await.unwrap();
    client.unlike_tweet("42").await.unwrap();

    let urls: Vec<String> = client.transport().requests().into_iter().map(|r| r.url).collect();
    assert_eq!(
        urls,
        vec![
            "https://api.test/2/users/me",
            "https://api.test/2/users/777/likes",
            "https://api.test/2/users/777/likes/42",
        ]
    );
}

#[tokio::test]
async fn test_concurrent_first_use_fetches_once() {
    let client = client(vec![me()]);
    let (a, b) = tokio::join!(client.authenticated_user_id(), client.authenticated_user_id());
    assert_eq!(a.unwrap(), "777");
    assert_eq!(b.unwrap(), "777");
    assert_eq!(client.transport().requests().len(), 1);
}

#[tokio::test]
async fn test_failed_user_lookup_is_not_cached() {
    let client = client(vec![
        Ok(HttpResponse::new(503, r#"{"errors":[{"message":"over capacity"}]}"#)),
        me(),
    ]);

    let err = client.authenticated_user_id().await.unwrap_err();
    assert_eq!(err.to_string(), "API error (HTTP 503): over capacity");
    assert_eq!(client.authenticated_user_id().await.unwrap(), "777");
}

#[tokio::test]
async fn test_engagement_posts_tweet_id() {
    let client = client(vec![me(), ok(json!({"data": {"retweeted": true}}))]);
    client.retweet("42").await.unwrap();

    let request = &client.transport().requests()[1];
    assert_eq!(request.url, "https://api.test/2/users/777/retweets");
    let sent: Value = serde_json::from_slice(request.body.as_ref().unwrap()).unwrap();
    assert_eq!(sent, json!({"tweet_id": "42"}));
}

// ============================================================================
// Endpoint Builders
// ============================================================================

#[tokio::test]
async fn test_timeline_clamps_and_passes_since_id() {
    let client = client(vec![ok(json!({"data": []}))]);
    client.get_timeline("12", 1, Some("99")).await.unwrap();

    let url = &client.transport().requests()[0].url;
    assert!(url.starts_with("https://api.test/2/users/12/tweets?"));
    assert!(url.contains("max_results=5"));
    assert!(url.contains("since_id=99"));
}

#[tokio::test]
async fn test_timeline_without_since_id() {
    let client = client(vec![ok(json!({"data": []}))]);
    client.get_timeline("12", 500, None).await.unwrap();

    let url = &client.transport().requests()[0].url;
    assert!(url.contains("max_results=100"));
    assert!(!url.contains("since_id"));
}

#[tokio::test]
async fn test_search_and_follower_clamps() {
    let client = client(vec![ok(json!({"data": []})), ok(json!({"data": []}))]);
    client.search_tweets("rust", 3).await.unwrap();
    client.get_followers("12", 0).await.unwrap();

    let requests = client.transport().requests();
    assert!(requests[0].url.contains("max_results=10"));
    assert!(requests[0].url.contains("query=rust"));
    assert!(requests[1].url.contains("/users/12/followers?"));
    assert!(requests[1].url.contains("max_results=1"));
}

#[tokio::test]
async fn test_post_tweet_body() {
    let client = client(vec![ok(json!({"data": {"id": "5", "text": "q"}}))]);
    let poll = PollSpec {
        options: vec!["yes".to_string(), "no".to_string()],
        duration_minutes: 60,
    };
    client
        .post_tweet("q", Some("1"), Some("2"), Some(&poll))
        .await
        .unwrap();

    let request = &client.transport().requests()[0];
    let sent: Value = serde_json::from_slice(request.body.as_ref().unwrap()).unwrap();
    assert_eq!(
        sent,
        json!({
            "text": "q",
            "reply": {"in_reply_to_tweet_id": "1"},
            "quote_tweet_id": "2",
            "poll": {"options": ["yes", "no"], "duration_minutes": 60}
        })
    );
}

// ============================================================================
// Classification Through The Gateway
// ============================================================================

#[tokio::test]
async fn test_rate_limit_surfaces_reset() {
    let mut response = HttpResponse::new(429, "");
    response
        .headers
        .insert(RATE_LIMIT_RESET_HEADER, HeaderValue::from_static("1700000030"));
    let client = client(vec![Ok(response)]);

    let err = client.get_user("jack").await.unwrap_err();
    assert!(err.is_rate_limited());
    assert_eq!(err.rate_limit().unwrap().reset_timestamp(), Some(1_700_000_030));
}

#[tokio::test]
async fn test_200_with_errors_only_is_api_error() {
    let client = client(vec![ok(json!({"errors": [{"detail": "x"}]}))]);
    let err = client.get_tweet("1").await.unwrap_err();
    assert!(matches!(err, FetchError::Api { status: 200, .. }));
    assert_eq!(err.to_string(), "API error: x");
}

#[tokio::test]
async fn test_transport_failure_is_transport_error() {
    let client = client(vec![Err(FetchError::Transport("connection reset".to_string()))]);
    let err = client.get_user("jack").await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
}
