//! User objects.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A user as returned by the v2 API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Numeric user ID (decimal string).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Handle without the leading `@`.
    pub username: String,

    /// Profile bio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Verification badge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,

    /// Free-form location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Account creation timestamp (ISO 8601).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Follower/following/tweet counters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_metrics: Option<BTreeMap<String, Value>>,

    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Creates a user with the required fields only.
    pub fn new(id: impl Into<String>, name: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            username: username.into(),
            description: None,
            verified: None,
            location: None,
            created_at: None,
            public_metrics: None,
            extra: Map::new(),
        }
    }

    /// Returns a counter from `public_metrics`, if present and numeric.
    pub fn metric(&self, key: &str) -> Option<u64> {
        self.public_metrics.as_ref()?.get(key)?.as_u64()
    }

    /// Returns true if the account carries a verification badge.
    pub fn is_verified(&self) -> bool {
        self.verified.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_lookup() {
        let json = r#"{
            "id": "12",
            "name": "Jack",
            "username": "jack",
            "public_metrics": {"followers_count": 6400000, "following_count": 4}
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.metric("followers_count"), Some(6_400_000));
        assert_eq!(user.metric("listed_count"), None);
        assert!(!user.is_verified());
    }
}
