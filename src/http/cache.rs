//! HTTP cache validation module
//!
//! `ETag` generation and `If-None-Match` handling for static files.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Weak `ETag` built from the content length and a content hash, e.g. `W/"1a-9f3c..."`
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("W/\"{:x}-{:x}\"", content.len(), hasher.finish())
}

/// Whether the client's `If-None-Match` list matches `etag` (weak comparison, `*` matches anything)
pub fn etag_matches(if_none_match: Option<&str>, etag: &str) -> bool {
    let ours = opaque_tag(etag);
    if_none_match.is_some_and(|header| {
        header.split(',').map(str::trim).any(|candidate| {
            candidate == "*" || opaque_tag(candidate) == ours
        })
    })
}

fn opaque_tag(tag: &str) -> &str {
    tag.strip_prefix("W/").unwrap_or(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_etag() {
        let etag = generate_etag(b"hello world");
        assert!(etag.starts_with("W/\"b-"));
        assert!(etag.ends_with('"'));
        assert_eq!(etag, generate_etag(b"hello world"));
        assert_ne!(etag, generate_etag(b"hello worle"));
    }

    #[test]
    fn test_etag_matches() {
        let etag = generate_etag(b"abc");
        let strong = etag.trim_start_matches("W/").to_string();
        assert!(etag_matches(Some(&etag), &etag));
        assert!(etag_matches(Some(&strong), &etag));
        assert!(etag_matches(Some(&format!("\"xyz\", {etag}")), &etag));
        assert!(etag_matches(Some("*"), &etag));
        assert!(!etag_matches(Some("\"different\""), &etag));
        assert!(!etag_matches(None, &etag));
    }
}
