//! Domain resolution for per-site preferences

use url::Url;

/// Schemes whose pages can carry a per-site preference.
const SUPPORTED_SCHEMES: [&str; 2] = ["http", "https"];

/// Resolve the preference key for a URL
///
/// The key is the bare host: lowercase, no scheme, port or path.
/// Internal browser pages (`chrome://`, `about:`, `file://`) and anything
/// that does not parse resolve to `None`, and callers skip the operation.
///
/// Examples:
/// - https://www.google.com/search → www.google.com
/// - http://localhost:3000/app → localhost
/// - chrome://settings → None
pub fn resolve_domain(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    let parsed = Url::parse(url).ok()?;
    if !SUPPORTED_SCHEMES.contains(&parsed.scheme()) {
        return None;
    }

    parsed
        .host_str()
        .filter(|host| !host.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_domain_basic() {
        assert_eq!(resolve_domain("https://example.com"), Some("example.com".to_string()));
        assert_eq!(resolve_domain("http://example.com"), Some("example.com".to_string()));
        assert_eq!(resolve_domain("https://www.google.com"), Some("www.google.com".to_string()));
    }

    #[test]
    fn test_resolve_domain_keeps_subdomains() {
        assert_eq!(resolve_domain("https://docs.microsoft.com"), Some("docs.microsoft.com".to_string()));
        assert_eq!(resolve_domain("https://news.bbc.co.uk/article"), Some("news.bbc.co.uk".to_string()));
    }

    #[test]
    fn test_resolve_domain_strips_path_query_and_port() {
        assert_eq!(resolve_domain("https://www.google.com/search?q=rust"), Some("www.google.com".to_string()));
        assert_eq!(resolve_domain("http://localhost:3000/app#top"), Some("localhost".to_string()));
        assert_eq!(resolve_domain("http://127.0.0.1:8080"), Some("127.0.0.1".to_string()));
    }

    #[test]
    fn test_resolve_domain_lowercases_host() {
        assert_eq!(resolve_domain("https://GitHub.COM/rust-lang"), Some("github.com".to_string()));
        assert_eq!(resolve_domain("  https://example.com  "), Some("example.com".to_string()));
    }

    #[test]
    fn test_resolve_domain_internal_pages() {
        assert_eq!(resolve_domain("chrome://settings"), None);
        assert_eq!(resolve_domain("chrome-extension://abcdef/popup.html"), None);
        assert_eq!(resolve_domain("about:blank"), None);
        assert_eq!(resolve_domain("edge://extensions"), None);
        assert_eq!(resolve_domain("file:///home/user/index.html"), None);
    }

    #[test]
    fn test_resolve_domain_unparseable() {
        assert_eq!(resolve_domain(""), None);
        assert_eq!(resolve_domain("not-a-url"), None);
        assert_eq!(resolve_domain("https://"), None);
    }
}
