//! URL helper functions

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// RFC 3986 unreserved characters
    static ref URL_SAFE: Regex = Regex::new(r"^[A-Za-z0-9._~-]+$").unwrap();
}

/// Check whether a path segment can appear in a URL without escaping
pub fn is_url_safe(segment: &str) -> bool {
    URL_SAFE.is_match(segment) && segment != "." && segment != ".."
}

/// Join a base URL and a path with exactly one slash between them
///
/// # Examples
/// ```ignore
/// join_url("https://example.com/", "/posts/hello.html") // -> "https://example.com/posts/hello.html"
/// ```
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", base)
    } else {
        format!("{}/{}", base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_url_safe() {
        assert!(is_url_safe("hello-world"));
        assert!(is_url_safe("2023_recap.v2"));
        assert!(!is_url_safe("hello world"));
        assert!(!is_url_safe("café"));
        assert!(!is_url_safe("a/b"));
        assert!(!is_url_safe(""));
        assert!(!is_url_safe(".."));
    }

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("https://example.com/", "/posts/a.html"),
            "https://example.com/posts/a.html"
        );
        assert_eq!(join_url("https://example.com", ""), "https://example.com/");
    }
}
