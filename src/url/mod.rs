//! URL handling module for Site-Intel
//!
//! This module provides URL normalization, host comparison, seed construction
//! and path helpers used to key pages and group them into a hierarchy.

mod domain;
mod normalize;

use crate::UrlError;
use url::Url;

// Re-export main functions
pub use domain::{extract_domain, same_site};
pub use normalize::normalize_url;

/// Builds the crawl seed for a domain
///
/// A bare domain (`example.com`) is crawled from `https://example.com/`.
/// Input that already carries a scheme is normalized as given, which lets a
/// crawl start from a plain-http or non-default-port origin.
///
/// # Examples
///
/// ```
/// use site_intel::url::seed_url;
///
/// assert_eq!(seed_url("Example.com").unwrap().as_str(), "https://example.com/");
/// assert_eq!(
///     seed_url("http://127.0.0.1:8080").unwrap().as_str(),
///     "http://127.0.0.1:8080/"
/// );
/// ```
pub fn seed_url(domain: &str) -> Result<Url, UrlError> {
    let domain = domain.trim();
    if domain.is_empty() {
        return Err(UrlError::MissingDomain);
    }

    if domain.contains("://") {
        normalize_url(domain)
    } else {
        normalize_url(&format!("https://{}", domain.trim_end_matches('/')))
    }
}

/// Returns the parent path of a URL's path
///
/// Top-level pages (`/about`) belong to `/`; nested pages (`/blog/post-1`)
/// belong to their directory (`/blog`). The root page has no parent.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_intel::url::parent_path;
///
/// let about = Url::parse("https://example.com/about").unwrap();
/// assert_eq!(parent_path(&about), Some("/".to_string()));
///
/// let post = Url::parse("https://example.com/blog/2024/post").unwrap();
/// assert_eq!(parent_path(&post), Some("/blog/2024".to_string()));
///
/// let root = Url::parse("https://example.com/").unwrap();
/// assert_eq!(parent_path(&root), None);
/// ```
pub fn parent_path(url: &Url) -> Option<String> {
    let segments: Vec<&str> = url.path().split('/').filter(|s| !s.is_empty()).collect();

    match segments.len() {
        0 => None,
        1 => Some("/".to_string()),
        n => Some(format!("/{}", segments[..n - 1].join("/"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_from_bare_domain() {
        let seed = seed_url("example.com").unwrap();
        assert_eq!(seed.as_str(), "https://example.com/");
    }

    #[test]
    fn test_seed_strips_trailing_slash_and_whitespace() {
        let seed = seed_url("  example.com/ ").unwrap();
        assert_eq!(seed.as_str(), "https://example.com/");
    }

    #[test]
    fn test_seed_with_explicit_scheme() {
        let seed = seed_url("http://localhost:3000").unwrap();
        assert_eq!(seed.as_str(), "http://localhost:3000/");
    }

    #[test]
    fn test_seed_rejects_empty() {
        assert!(matches!(seed_url("   "), Err(UrlError::MissingDomain)));
    }

    #[test]
    fn test_seed_rejects_garbage() {
        assert!(seed_url("exa mple.com").is_err());
    }

    #[test]
    fn test_parent_path_of_top_level_page() {
        let url = Url::parse("https://example.com/contact").unwrap();
        assert_eq!(parent_path(&url), Some("/".to_string()));
    }

    #[test]
    fn test_parent_path_ignores_query() {
        let url = Url::parse("https://example.com/docs/setup?lang=en").unwrap();
        assert_eq!(parent_path(&url), Some("/docs".to_string()));
    }

    #[test]
    fn test_root_has_no_parent() {
        let url = Url::parse("https://example.com").unwrap();
        assert_eq!(parent_path(&url), None);
    }
}
