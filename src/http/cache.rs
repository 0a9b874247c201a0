//! Conditional request support for static assets
//!
//! Assets are re-read on every request, so validation is by content hash
//! rather than modification time.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Quoted strong `ETag` derived from the asset bytes
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("\"{:x}-{:x}\"", content.len(), hasher.finish())
}

/// Whether an `If-None-Match` value names `etag` (or `*`)
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    let Some(header) = if_none_match else {
        return false;
    };
    header
        .split(',')
        .map(str::trim)
        .map(|candidate| candidate.strip_prefix("W/").unwrap_or(candidate))
        .any(|candidate| candidate == "*" || candidate == etag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_etag_is_quoted_and_stable() {
        let etag = generate_etag(b"body { color: red }");
        assert!(etag.starts_with('"') && etag.ends_with('"'));
        assert_eq!(etag, generate_etag(b"body { color: red }"));
        assert_ne!(etag, generate_etag(b"body { color: blue }"));
    }

    #[test]
    fn test_check_etag_match() {
        let etag = "\"a-1f\"";
        assert!(check_etag_match(Some("\"a-1f\""), etag));
        assert!(check_etag_match(Some("\"zz\", \"a-1f\""), etag));
        assert!(check_etag_match(Some("W/\"a-1f\""), etag));
        assert!(check_etag_match(Some("*"), etag));
        assert!(!check_etag_match(Some("\"other\""), etag));
        assert!(!check_etag_match(None, etag));
    }
}
