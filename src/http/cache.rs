//! HTTP cache validation module
//!
//! `ETag` generation and `If-None-Match` evaluation for asset responses.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Generate a quoted `ETag` from response content.
///
/// The tag is a content hash, so identical bytes always produce identical
/// tags across requests and restarts.
pub fn etag_for(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let v = hasher.finish();
    format!("\"{v:x}\"")
}

/// Evaluate a client's `If-None-Match` header against the current `ETag`.
///
/// Handles a single tag, a comma-separated list, and the `*` wildcard.
/// Returns true when the client's copy is current (respond 304).
pub fn none_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client_etag| {
        client_etag
            .split(',')
            .any(|e| e.trim() == etag || e.trim() == "*")
    })
}

/// Cache-Control value for asset responses
pub fn cache_control(max_age: u32) -> String {
    format!("public, max-age={max_age}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn etag_is_quoted() {
        let etag = etag_for(b"<html></html>");
        assert!(etag.starts_with('"'));
        assert!(etag.ends_with('"'));
        assert!(etag.len() > 2);
    }

    #[test]
    fn identical_bytes_share_an_etag() {
        assert_eq!(etag_for(b"same content"), etag_for(b"same content"));
    }

    #[test]
    fn different_bytes_get_different_etags() {
        assert_ne!(etag_for(b"styles.css v1"), etag_for(b"styles.css v2"));
    }

    #[test]
    fn none_match_forms() {
        let etag = "\"abc123\"";
        assert!(none_match(Some("\"abc123\""), etag));
        assert!(none_match(Some("\"xyz\", \"abc123\""), etag));
        assert!(none_match(Some("*"), etag));
        assert!(!none_match(Some("\"different\""), etag));
        assert!(!none_match(None, etag));
    }

    #[test]
    fn cache_control_carries_max_age() {
        assert_eq!(cache_control(86_400), "public, max-age=86400");
        assert_eq!(cache_control(0), "public, max-age=0");
    }
}
