//! The X API gateway.
//!
//! [`ApiClient`] attaches authentication, sends requests through a
//! [`Transport`], and classifies every response into an [`Envelope`] or a
//! [`FetchError`].

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{debug, instrument};

use xcli_core::{ApiErrorDetail, Credentials, Envelope};

use crate::error::{FetchError, RateLimitSignal, body_excerpt};
use crate::host::http::ReqwestTransport;
use crate::oauth::OAuthSigner;
use crate::transport::{HttpRequest, HttpResponse, Transport};

/// Base URL of the v2 API.
pub const API_BASE: &str = "https://api.x.com/2";

/// Header carrying the Unix time at which a rate-limit window resets.
pub const RATE_LIMIT_RESET_HEADER: &str = "x-rate-limit-reset";

// ============================================================================
// API Client
// ============================================================================

/// Authenticated access to the v2 API.
///
/// Reads use the app bearer token; writes and user-context reads are signed
/// with OAuth 1.0a. The authenticated user's ID is fetched at most once per
/// client, even under concurrent first use.
#[derive(Debug)]
pub struct ApiClient<T = ReqwestTransport> {
    credentials: Credentials,
    signer: OAuthSigner,
    transport: T,
    base_url: String,
    user_id: OnceCell<String>,
}

impl ApiClient<ReqwestTransport> {
    /// Creates a client over the default HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(credentials: Credentials) -> Result<Self, FetchError> {
        Ok(Self::with_transport(credentials, ReqwestTransport::new()?))
    }
}

impl<T: Transport> ApiClient<T> {
    /// Creates a client over a custom transport.
    pub fn with_transport(credentials: Credentials, transport: T) -> Self {
        let signer = OAuthSigner::new(&credentials);
        Self {
            credentials,
            signer,
            transport,
            base_url: API_BASE.to_string(),
            user_id: OnceCell::new(),
        }
    }

    /// Overrides the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Replaces the OAuth signer (e.g. to pin clock and nonce).
    pub fn with_signer(mut self, signer: OAuthSigner) -> Self {
        self.signer = signer;
        self
    }

    /// Returns the API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Joins `path` onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Sends an app-only GET with the bearer token.
    ///
    /// # Errors
    ///
    /// Returns the classified error for the response.
    #[instrument(skip(self))]
    pub async fn bearer_get(&self, url: &str) -> Result<Envelope, FetchError> {
        let mut request = HttpRequest::new(Method::GET, url);
        request
            .headers
            .insert(AUTHORIZATION, header_value(&format!("Bearer {}", self.credentials.bearer_token))?);
        self.send(request).await
    }

    /// Sends an OAuth-signed request, with an optional JSON body.
    ///
    /// # Errors
    ///
    /// Returns the classified error for the response.
    #[instrument(skip(self, body))]
    pub async fn signed_request(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Envelope, FetchError> {
        let authorization = self.signer.sign(method.as_str(), url);
        let mut request = HttpRequest::new(method, url);
        request.headers.insert(AUTHORIZATION, header_value(&authorization)?);

        if let Some(body) = body {
            let bytes = serde_json::to_vec(body)
                .map_err(|e| FetchError::InvalidRequest(format!("unserialisable body: {e}")))?;
            request
                .headers
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            request.body = Some(bytes);
        }

        self.send(request).await
    }

    /// Returns the authenticated user's ID, fetching it on first use.
    ///
    /// A failed lookup is not cached; the next call tries again.
    ///
    /// # Errors
    ///
    /// Returns the error from `GET /users/me`, or a decode error if the
    /// response does not carry a user.
    pub async fn authenticated_user_id(&self) -> Result<String, FetchError> {
        let id = self
            .user_id
            .get_or_try_init(|| async {
                let url = self.endpoint("users/me");
                let envelope = self.signed_request(Method::GET, &url, None).await?;
                let user = envelope
                    .user()
                    .ok_or_else(|| FetchError::decode("users/me returned no user", b""))?;
                debug!(user_id = %user.id, "Resolved authenticated user");
                Ok::<_, FetchError>(user.id.clone())
            })
            .await?;
        Ok(id.clone())
    }

    async fn send(&self, request: HttpRequest) -> Result<Envelope, FetchError> {
        let response = self.transport.execute(request).await?;
        classify(&response)
    }
}

fn header_value(value: &str) -> Result<HeaderValue, FetchError> {
    HeaderValue::from_str(value)
        .map_err(|_| FetchError::InvalidRequest("credential contains invalid header characters".to_string()))
}

// ============================================================================
// Response Classification
// ============================================================================

/// Turns a raw response into an envelope or exactly one error.
///
/// Checks run in order: 429, JSON well-formedness, non-2xx status, a 2xx
/// body carrying errors and no data, then the envelope shape.
///
/// # Errors
///
/// See [`FetchError`] for the possible classifications.
pub fn classify(response: &HttpResponse) -> Result<Envelope, FetchError> {
    if response.status == 429 {
        let signal = RateLimitSignal::new(response.header(RATE_LIMIT_RESET_HEADER));
        debug!(reset_at = signal.reset_label(), "Rate limited");
        return Err(FetchError::RateLimited(signal));
    }

    let value: Value = serde_json::from_slice(&response.body)
        .map_err(|e| FetchError::decode(e.to_string(), &response.body))?;

    if !response.is_success() {
        return Err(api_error(response.status, &value, &response.body));
    }

    let has_errors = value
        .get("errors")
        .and_then(Value::as_array)
        .is_some_and(|errors| !errors.is_empty());
    let has_data = value.get("data").is_some_and(|data| !data.is_null());
    if has_errors && !has_data {
        return Err(api_error(response.status, &value, &response.body));
    }

    serde_json::from_value(value).map_err(|e| FetchError::decode(e.to_string(), &response.body))
}

fn api_error(status: u16, value: &Value, body: &[u8]) -> FetchError {
    let messages: Vec<String> = value
        .get("errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| serde_json::from_value::<ApiErrorDetail>(e.clone()).ok())
                .filter_map(|e| e.best_message().map(str::to_owned))
                .collect()
        })
        .unwrap_or_default();

    let message = if messages.is_empty() {
        body_excerpt(body)
    } else {
        messages.join("; ")
    };

    FetchError::Api { status, message }
}
