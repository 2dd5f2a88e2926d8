//! The gateway calls the engine depends on.

use async_trait::async_trait;

use xcli_core::Envelope;
use xcli_fetch::{ApiClient, FetchError, Transport};

/// Account lookup and timeline reads.
#[async_trait]
pub trait WatchApi: Send + Sync {
    /// Resolves a username (without `@`) to its numeric account ID.
    async fn lookup_user(&self, username: &str) -> Result<String, FetchError>;

    /// Fetches up to `max_results` tweets newer than `since_id`, newest first.
    async fn timeline(
        &self,
        user_id: &str,
        max_results: u32,
        since_id: Option<&str>,
    ) -> Result<Envelope, FetchError>;
}

#[async_trait]
impl<T: Transport> WatchApi for ApiClient<T> {
    async fn lookup_user(&self, username: &str) -> Result<String, FetchError> {
        let envelope = self.get_user(username).await?;
        envelope
            .user()
            .map(|u| u.id.clone())
            .ok_or_else(|| FetchError::decode(format!("no user data for @{username}"), b""))
    }

    async fn timeline(
        &self,
        user_id: &str,
        max_results: u32,
        since_id: Option<&str>,
    ) -> Result<Envelope, FetchError> {
        self.get_timeline(user_id, max_results, since_id).await
    }
}
