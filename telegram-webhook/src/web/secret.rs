//! Shared-secret extraction and verification.
//!
//! The caller proves itself by echoing a pre-agreed string either in the
//! `secret` query parameter or in the `x-telegram-secret` header. The query
//! parameter wins; the header is only consulted when the parameter is
//! missing or empty.

use axum::http::{HeaderMap, Uri};
use sha2::{Digest, Sha256};
use tracing::warn;

/// Query parameter carrying the shared secret.
pub const SECRET_QUERY_PARAM: &str = "secret";

/// Header carrying the shared secret when the query parameter is absent.
pub const SECRET_HEADER: &str = "x-telegram-secret";

/// Pull the candidate secret out of a request.
///
/// Returns the first non-empty `secret` query value, otherwise the
/// `x-telegram-secret` header. Header values that are not valid UTF-8 count
/// as absent.
pub fn extract_provided_secret(uri: &Uri, headers: &HeaderMap) -> Option<String> {
    let from_query = uri.query().and_then(|query| {
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == SECRET_QUERY_PARAM)
            .map(|(_, value)| value.into_owned())
    });

    match from_query {
        Some(secret) if !secret.is_empty() => Some(secret),
        _ => headers
            .get(SECRET_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_owned),
    }
}

/// Check a provided secret against the configured one.
///
/// With no expected secret configured every request passes. Otherwise the
/// provided value must be present and equal.
pub fn verify_secret(expected: Option<&str>, provided: Option<&str>) -> bool {
    let expected = match expected {
        Some(e) if !e.is_empty() => e,
        _ => return true,
    };

    let provided = match provided {
        Some(p) => p,
        None => {
            warn!("telegram_secret_missing");
            return false;
        }
    };

    let valid = digest_compare(expected, provided);

    if !valid {
        warn!(provided_length = provided.len(), "telegram_secret_mismatch");
    }

    valid
}

/// Compare two strings in constant time.
///
/// Both sides are hashed first so the comparison always runs over 32 bytes
/// and the secret length is not observable.
fn digest_compare(a: &str, b: &str) -> bool {
    let a = Sha256::digest(a.as_bytes());
    let b = Sha256::digest(b.as_bytes());

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn uri(s: &str) -> Uri {
        s.parse().unwrap()
    }

    fn headers_with_secret(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(SECRET_HEADER, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extract_from_query() {
        let provided = extract_provided_secret(&uri("/api/telegram?secret=abc"), &HeaderMap::new());
        assert_eq!(provided.as_deref(), Some("abc"));
    }

    #[test]
    fn test_extract_query_is_percent_decoded() {
        let provided =
            extract_provided_secret(&uri("/api/telegram?secret=a%2Bb%20c"), &HeaderMap::new());
        assert_eq!(provided.as_deref(), Some("a+b c"));
    }

    #[test]
    fn test_extract_query_wins_over_header() {
        let provided =
            extract_provided_secret(&uri("/api/telegram?secret=q"), &headers_with_secret("h"));
        assert_eq!(provided.as_deref(), Some("q"));
    }

    #[test]
    fn test_extract_falls_back_to_header() {
        let provided = extract_provided_secret(&uri("/api/telegram"), &headers_with_secret("h"));
        assert_eq!(provided.as_deref(), Some("h"));
    }

    #[test]
    fn test_extract_empty_query_falls_back_to_header() {
        let provided =
            extract_provided_secret(&uri("/api/telegram?secret="), &headers_with_secret("h"));
        assert_eq!(provided.as_deref(), Some("h"));
    }

    #[test]
    fn test_extract_first_query_value_used() {
        let provided = extract_provided_secret(
            &uri("/api/telegram?other=1&secret=first&secret=second"),
            &HeaderMap::new(),
        );
        assert_eq!(provided.as_deref(), Some("first"));
    }

    #[test]
    fn test_extract_none() {
        assert_eq!(
            extract_provided_secret(&uri("/api/telegram?foo=bar"), &HeaderMap::new()),
            None
        );
    }

    #[test]
    fn test_extract_ignores_non_utf8_header() {
        let mut headers = HeaderMap::new();
        headers.insert(SECRET_HEADER, HeaderValue::from_bytes(&[0xff, 0xfe]).unwrap());
        assert_eq!(extract_provided_secret(&uri("/api/telegram"), &headers), None);
    }

    #[test]
    fn test_verify_without_expected_secret() {
        assert!(verify_secret(None, None));
        assert!(verify_secret(None, Some("anything")));
        assert!(verify_secret(Some(""), None));
    }

    #[test]
    fn test_verify_with_expected_secret() {
        assert!(verify_secret(Some("abc"), Some("abc")));
        assert!(!verify_secret(Some("abc"), Some("wrong")));
        assert!(!verify_secret(Some("abc"), Some("abcd")));
        assert!(!verify_secret(Some("abc"), None));
    }

    #[test]
    fn test_digest_compare() {
        assert!(digest_compare("abc", "abc"));
        assert!(!digest_compare("abc", "abd"));
        assert!(!digest_compare("abc", ""));
    }
}
