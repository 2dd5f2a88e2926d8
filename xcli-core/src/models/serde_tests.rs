//! Serde tests for the response envelope.
//!
//! These tests verify that every payload shape the API returns lands in the
//! right [`Data`] variant and that unexpected shapes fail to decode.

use serde_json::json;

use crate::{Data, Envelope};

// ============================================================================
// Data Variant Selection
// ============================================================================

#[test]
fn test_tweet_list_decodes_as_tweets() {
    let json = r#"{
        "data": [
            {"id": "12", "text": "third", "author_id": "1"},
            {"id": "11", "text": "second", "author_id": "1"}
        ],
        "includes": {"users": [{"id": "1", "name": "Alice", "username": "alice"}]},
        "meta": {"result_count": 2, "newest_id": "12", "oldest_id": "11", "next_token": "abc"}
    }"#;

    let envelope: Envelope = serde_json::from_str(json).unwrap();
    assert!(matches!(envelope.data, Some(Data::Tweets(_))));
    assert_eq!(envelope.tweets().len(), 2);
    assert_eq!(envelope.tweets()[0].id, "12");
    assert_eq!(envelope.includes.find_user("1").unwrap().username, "alice");
    assert_eq!(envelope.next_token(), Some("abc"));
}

#[test]
fn test_user_list_decodes_as_users() {
    let json = r#"{"data": [
        {"id": "1", "name": "Alice", "username": "alice"},
        {"id": "2", "name": "Bob", "username": "bob", "description": "hi"}
    ]}"#;

    let envelope: Envelope = serde_json::from_str(json).unwrap();
    match envelope.data {
        Some(Data::Users(users)) => assert_eq!(users[1].username, "bob"),
        other => panic!("Expected users, got {other:?}"),
    }
}

#[test]
fn test_single_objects() {
    let tweet: Envelope = serde_json::from_str(r#"{"data": {"id": "5", "text": "hello"}}"#).unwrap();
    assert!(matches!(tweet.data, Some(Data::Tweet(_))));
    assert_eq!(tweet.tweets().len(), 1);

    let user: Envelope =
        serde_json::from_str(r#"{"data": {"id": "1", "name": "A", "username": "a"}}"#).unwrap();
    assert_eq!(user.user().unwrap().id, "1");
    assert!(user.tweets().is_empty());
}

#[test]
fn test_action_result() {
    let envelope: Envelope = serde_json::from_str(r#"{"data": {"liked": true}}"#).unwrap();
    match envelope.data {
        Some(Data::Action(action)) => assert_eq!(action.flag("liked"), Some(true)),
        other => panic!("Expected action, got {other:?}"),
    }
}

#[test]
fn test_empty_list_has_no_tweets() {
    let envelope: Envelope = serde_json::from_str(r#"{"data": []}"#).unwrap();
    assert!(envelope.tweets().is_empty());
}

#[test]
fn test_null_and_missing_data() {
    let null: Envelope =
        serde_json::from_str(r#"{"data": null, "errors": [{"detail": "x"}]}"#).unwrap();
    assert!(null.data.is_none());
    assert_eq!(null.errors[0].best_message(), Some("x"));

    let missing: Envelope = serde_json::from_str(r#"{"meta": {"result_count": 0}}"#).unwrap();
    assert!(missing.data.is_none());
    assert_eq!(missing.meta.unwrap().result_count, Some(0));
}

// ============================================================================
// Shape Mismatches
// ============================================================================

#[test]
fn test_scalar_data_is_rejected() {
    let result: Result<Envelope, _> = serde_json::from_str(r#"{"data": 42}"#);
    assert!(result.is_err());
}

#[test]
fn test_list_of_scalars_is_rejected() {
    let result: Result<Envelope, _> = serde_json::from_str(r#"{"data": ["a", "b"]}"#);
    assert!(result.is_err());
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn test_serialization_omits_empty_sections() {
    let envelope: Envelope = serde_json::from_str(r#"{"data": {"id": "5", "text": "hi"}}"#).unwrap();
    let value = serde_json::to_value(&envelope).unwrap();
    assert_eq!(value, json!({"data": {"id": "5", "text": "hi"}}));
}

#[test]
fn test_error_message_fallbacks() {
    let envelope: Envelope = serde_json::from_str(
        r#"{"errors": [{"detail": ""}, {"message": "Rate"}, {"title": "only title"}]}"#,
    )
    .unwrap();
    let messages: Vec<_> = envelope.errors.iter().map(|e| e.best_message()).collect();
    assert_eq!(messages, vec![None, Some("Rate"), None]);
}
