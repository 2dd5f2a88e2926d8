//! Integration tests for the core envelope types.

use xcli_core::{Envelope, Includes, Tweet, User};

#[test]
fn test_single_tweet_envelope_carries_includes() {
    let includes = Includes {
        users: vec![User::new("1", "Alice", "alice")],
        ..Default::default()
    };
    let envelope = Envelope::single_tweet(Tweet::new("10", "hello"), includes);

    assert_eq!(envelope.tweets()[0].text, "hello");
    assert_eq!(envelope.includes.find_user("1").unwrap().name, "Alice");
    assert!(envelope.meta.is_none());
}

#[test]
fn test_single_tweet_envelope_serializes_like_the_api() {
    let envelope = Envelope::single_tweet(Tweet::new("10", "hello"), Includes::default());
    let json = serde_json::to_string(&envelope).unwrap();
    let parsed: Envelope = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, envelope);
}
