//! Tweet ID parsing and ordering.

use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

use crate::error::CoreError;

static TWEET_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:twitter\.com|x\.com)/\w+/status/(\d+)").expect("static regex is valid")
});

/// Extracts a tweet ID from a status URL or a raw numeric string.
///
/// ```
/// use xcli_core::parse_tweet_id;
///
/// assert_eq!(parse_tweet_id("https://x.com/jack/status/20").unwrap(), "20");
/// assert_eq!(parse_tweet_id(" 20 ").unwrap(), "20");
/// assert!(parse_tweet_id("jack").is_err());
/// ```
pub fn parse_tweet_id(input: &str) -> Result<String, CoreError> {
    if let Some(caps) = TWEET_URL_RE.captures(input) {
        return Ok(caps[1].to_string());
    }

    let trimmed = input.trim();
    if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(trimmed.to_string());
    }

    Err(CoreError::InvalidTweetId(input.to_string()))
}

/// Removes leading `@` characters from a username.
pub fn strip_at(username: &str) -> &str {
    username.trim_start_matches('@')
}

/// Compares two snowflake IDs numerically.
///
/// IDs are arbitrary-length decimal strings, so they are compared by
/// significant length first and lexically second.
pub fn cmp_ids(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tweet_id_urls() {
        let cases = [
            ("https://x.com/elonmusk/status/1234567890", "1234567890"),
            ("https://twitter.com/jack/status/20", "20"),
            ("x.com/some_user/status/99?s=20", "99"),
        ];
        for (input, expected) in cases {
            assert_eq!(parse_tweet_id(input).unwrap(), expected, "Failed for {input}");
        }
    }

    #[test]
    fn test_parse_tweet_id_invalid() {
        assert!(matches!(
            parse_tweet_id("not-a-tweet"),
            Err(CoreError::InvalidTweetId(_))
        ));
        assert!(parse_tweet_id("").is_err());
        assert!(parse_tweet_id("12a").is_err());
    }

    #[test]
    fn test_strip_at() {
        assert_eq!(strip_at("@jack"), "jack");
        assert_eq!(strip_at("jack"), "jack");
        assert_eq!(strip_at("@@jack"), "jack");
    }

    #[test]
    fn test_cmp_ids_numeric() {
        assert_eq!(cmp_ids("9", "10"), Ordering::Less);
        assert_eq!(cmp_ids("1800000000000000001", "1800000000000000000"), Ordering::Greater);
        assert_eq!(cmp_ids("12", "12"), Ordering::Equal);
        assert_eq!(cmp_ids("012", "12"), Ordering::Equal);
    }
}
