//! Utility functions for URL normalization and input sanitization.
//!
//! This module contains the small pure helpers used throughout the library:
//! scheme normalization before dispatch and input-list filtering.

/// Check whether a URL carries a recognized scheme prefix.
///
/// Only `http://` and `https://` count; anything else (including bare
/// hostnames and scheme-less paths) is treated as unprefixed.
pub(crate) fn has_scheme(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Normalize a raw URL for probing.
///
/// Trims surrounding whitespace and prepends `http://` when no recognized
/// scheme prefix is present. The normalized form is the one that appears in
/// results; classification always refers to it, not the raw input.
///
/// # Arguments
///
/// * `raw` - The URL string as supplied by the caller
///
/// # Returns
///
/// The normalized URL string ready for dispatch.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if has_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}

/// Drop empty and whitespace-only entries from an input URL list.
///
/// The surviving entries are trimmed. The checker runs this on every input
/// list so the one-result-per-URL invariant is stated over sanitized input.
pub fn sanitize_urls(urls: &[String]) -> Vec<String> {
    urls.iter()
        .map(|u| u.trim())
        .filter(|u| !u.is_empty())
        .map(|u| u.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_adds_scheme() {
        assert_eq!(normalize_url("example.com"), "http://example.com");
        assert_eq!(normalize_url("httpstat.us/404"), "http://httpstat.us/404");
    }

    #[test]
    fn test_normalize_keeps_existing_scheme() {
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
        assert_eq!(normalize_url("https://example.com"), "https://example.com");
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(normalize_url("  example.com  "), "http://example.com");
    }

    #[test]
    fn test_scheme_prefix_must_be_complete() {
        // "httpx://..." has no recognized scheme and gets the http:// fallback
        assert_eq!(normalize_url("httpx://example.com"), "http://httpx://example.com");
        assert!(!has_scheme("httpexample.com"));
    }

    #[test]
    fn test_sanitize_drops_blank_entries() {
        let input = vec![
            "example.com".to_string(),
            "".to_string(),
            "   ".to_string(),
            "  test.org ".to_string(),
        ];
        let result = sanitize_urls(&input);
        assert_eq!(result, vec!["example.com", "test.org"]);
    }

    #[test]
    fn test_sanitize_empty_input() {
        let result = sanitize_urls(&[]);
        assert!(result.is_empty());
    }
}
