//! OAuth 1.0a HMAC-SHA1 request signing.
//!
//! User-context endpoints need an `Authorization: OAuth ...` header whose
//! signature covers the method, the URL without its query, and every
//! protocol and query parameter. Form bodies are never used, so JSON bodies
//! are not part of the signature.

use std::collections::BTreeMap;
use std::collections::HashSet;
use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rand::RngCore;
use sha1::Sha1;
use url::{Position, Url};

use xcli_core::{Clock, Credentials, SystemClock};

/// Everything except the RFC 3986 unreserved set `A-Z a-z 0-9 - . _ ~`.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";

/// Percent-encodes `s` as RFC 3986 requires: UTF-8 bytes, uppercase hex.
pub fn percent_encode(s: &str) -> String {
    utf8_percent_encode(s, OAUTH_ENCODE_SET).to_string()
}

// ============================================================================
// Nonce Source
// ============================================================================

/// Produces the per-request `oauth_nonce`.
pub trait NonceSource: Send + Sync {
    /// Returns a fresh nonce.
    fn nonce(&self) -> String;
}

/// 16 random bytes, hex-encoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomNonce;

impl NonceSource for RandomNonce {
    fn nonce(&self) -> String {
        let mut bytes = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut bytes);
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}

/// Always returns the same nonce. Used for reproducible signatures.
#[derive(Debug, Clone)]
pub struct StaticNonce(pub String);

impl NonceSource for StaticNonce {
    fn nonce(&self) -> String {
        self.0.clone()
    }
}

// ============================================================================
// Signer
// ============================================================================

/// Builds OAuth 1.0a `Authorization` headers.
#[derive(Clone)]
pub struct OAuthSigner {
    consumer_key: String,
    consumer_secret: String,
    token: String,
    token_secret: String,
    clock: Arc<dyn Clock>,
    nonces: Arc<dyn NonceSource>,
}

impl std::fmt::Debug for OAuthSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthSigner")
            .field("consumer_key", &self.consumer_key)
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

impl OAuthSigner {
    /// Creates a signer using the wall clock and random nonces.
    pub fn new(credentials: &Credentials) -> Self {
        Self {
            consumer_key: credentials.api_key.clone(),
            consumer_secret: credentials.api_secret.clone(),
            token: credentials.access_token.clone(),
            token_secret: credentials.access_token_secret.clone(),
            clock: Arc::new(SystemClock),
            nonces: Arc::new(RandomNonce),
        }
    }

    /// Replaces the timestamp source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the nonce source.
    pub fn with_nonce_source(mut self, nonces: Arc<dyn NonceSource>) -> Self {
        self.nonces = nonces;
        self
    }

    /// Returns the `Authorization` header value for `method` on `url`.
    pub fn sign(&self, method: &str, url: &str) -> String {
        let mut oauth = self.protocol_params();
        let base = signature_base_string(method, url, &oauth);
        let key = format!(
            "{}&{}",
            percent_encode(&self.consumer_secret),
            percent_encode(&self.token_secret)
        );
        let signature = hmac_sha1(&key, &base);
        oauth.insert("oauth_signature".to_string(), signature);

        let header = oauth
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join(", ");

        format!("OAuth {header}")
    }

    fn protocol_params(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("oauth_consumer_key".to_string(), self.consumer_key.clone()),
            ("oauth_nonce".to_string(), self.nonces.nonce()),
            ("oauth_signature_method".to_string(), SIGNATURE_METHOD.to_string()),
            ("oauth_timestamp".to_string(), self.clock.now_unix().to_string()),
            ("oauth_token".to_string(), self.token.clone()),
            ("oauth_version".to_string(), OAUTH_VERSION.to_string()),
        ])
    }
}

// ============================================================================
// Signature Base String
// ============================================================================

/// Builds `METHOD&enc(base_url)&enc(param_string)`.
///
/// Query parameters of `url` are merged with `oauth`; a repeated query key
/// contributes only its first value. A URL that cannot be parsed is signed
/// as-is with no query parameters.
pub fn signature_base_string(
    method: &str,
    url: &str,
    oauth: &BTreeMap<String, String>,
) -> String {
    let (base_url, query) = split_url(url);

    let mut params: BTreeMap<String, String> = oauth
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();

    let mut seen = HashSet::new();
    for (key, value) in query {
        if seen.insert(key.clone()) {
            params.insert(percent_encode(&key), percent_encode(&value));
        }
    }

    let param_string = params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(&base_url),
        percent_encode(&param_string)
    )
}

fn split_url(url: &str) -> (String, Vec<(String, String)>) {
    match Url::parse(url) {
        Ok(parsed) => {
            let query = parsed
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();
            (parsed[..Position::AfterPath].to_string(), query)
        }
        Err(_) => {
            let base = url.split('?').next().unwrap_or(url);
            (base.to_string(), Vec::new())
        }
    }
}

fn hmac_sha1(key: &str, data: &str) -> String {
    type HmacSha1 = Hmac<Sha1>;

    let mut mac = HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC can take key of any size");
    mac.update(data.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use xcli_core::FixedClock;

    // Worked example from the OAuth Core 1.0 appendix.
    const PHOTOS_URL: &str = "http://photos.example.net/photos?file=vacation.jpg&size=original";

    fn photos_signer() -> OAuthSigner {
        let creds = Credentials::new(
            "dpf43f3p2l4k3l03",
            "kd94hf93k423kf44",
            "nnch734d00sl2jdk",
            "pfkkdhi9sl3r4s00",
            "unused",
        );
        OAuthSigner::new(&creds)
            .with_clock(Arc::new(FixedClock(1_191_242_096)))
            .with_nonce_source(Arc::new(StaticNonce("kllo9940pd9333jh".to_string())))
    }

    #[test]
    fn test_percent_encode() {
        assert_eq!(percent_encode("AZaz09-._~"), "AZaz09-._~");
        assert_eq!(percent_encode("hello world"), "hello%20world");
        assert_eq!(percent_encode("a=b&c"), "a%3Db%26c");
        assert_eq!(percent_encode("@:/+*"), "%40%3A%2F%2B%2A");
        assert_eq!(percent_encode("é"), "%C3%A9");
    }

    #[test]
    fn test_signature_base_string_matches_reference() {
        let signer = photos_signer();
        let base = signature_base_string("get", PHOTOS_URL, &signer.protocol_params());
        assert_eq!(
            base,
            "GET&http%3A%2F%2Fphotos.example.net%2Fphotos&file%3Dvacation.jpg\
             %26oauth_consumer_key%3Ddpf43f3p2l4k3l03%26oauth_nonce%3Dkllo9940pd9333jh\
             %26oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1191242096\
             %26oauth_token%3Dnnch734d00sl2jdk%26oauth_version%3D1.0%26size%3Doriginal"
        );
    }

    #[test]
    fn test_sign_matches_reference_signature() {
        let header = photos_signer().sign("GET", PHOTOS_URL);
        assert!(header.starts_with("OAuth "));
        assert!(header.contains("oauth_signature=\"tR3%2BTy81lMeYAr%2FFid0kMTYa%2FWM%3D\""));
    }

    #[test]
    fn test_sign_is_deterministic_with_fixed_nonce_and_clock() {
        let signer = photos_signer();
        let first = signer.sign("POST", "https://api.x.com/2/tweets?b=2&a=1");
        let second = signer.sign("POST", "https://api.x.com/2/tweets?b=2&a=1");
        assert_eq!(first, second);
        assert!(first.contains("oauth_nonce=\"kllo9940pd9333jh\""));
        assert!(first.contains("oauth_timestamp=\"1191242096\""));

        let other_method = signer.sign("GET", "https://api.x.com/2/tweets?b=2&a=1");
        assert_ne!(first, other_method);
    }

    #[test]
    fn test_header_has_sorted_protocol_params() {
        let header = photos_signer().sign("GET", PHOTOS_URL);
        let keys: Vec<&str> = header
            .trim_start_matches("OAuth ")
            .split(", ")
            .filter_map(|pair| pair.split('=').next())
            .collect();
        assert_eq!(
            keys,
            vec![
                "oauth_consumer_key",
                "oauth_nonce",
                "oauth_signature",
                "oauth_signature_method",
                "oauth_timestamp",
                "oauth_token",
                "oauth_version",
            ]
        );
        // Query parameters are signed but never placed in the header.
        assert!(!header.contains("vacation"));
    }

    #[test]
    fn test_duplicate_query_key_uses_first_value() {
        let oauth = BTreeMap::new();
        let base = signature_base_string("GET", "https://api.x.com/2/x?a=1&a=2", &oauth);
        assert_eq!(base, "GET&https%3A%2F%2Fapi.x.com%2F2%2Fx&a%3D1");
    }

    #[test]
    fn test_malformed_url_signs_without_query() {
        let oauth = BTreeMap::new();
        let base = signature_base_string("POST", "not a url?x=1", &oauth);
        assert_eq!(base, "POST&not%20a%20url&");
    }

    #[test]
    fn test_random_nonce_is_hex() {
        let a = RandomNonce.nonce();
        let b = RandomNonce.nonce();
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_debug_hides_secrets() {
        let debug = format!("{:?}", photos_signer());
        assert!(!debug.contains("kd94hf93k423kf44"));
        assert!(!debug.contains("pfkkdhi9sl3r4s00"));
    }
}
