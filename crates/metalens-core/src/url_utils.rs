use url::Url;

/// Normalize a URL to its origin (scheme + host + optional port).
///
/// Falls back to trimming trailing slashes if the input cannot be parsed.
pub fn normalize_origin(input: &str) -> String {
    match Url::parse(input) {
        Ok(parsed) => parsed
            .origin()
            .ascii_serialization()
            .trim_end_matches('/')
            .to_string(),
        Err(_) => input.trim_end_matches('/').to_string(),
    }
}

/// URL of a root-level file such as `robots.txt` or `llms.txt` for the page's origin.
///
/// Returns `None` for inputs without an http(s) origin.
pub fn well_known_url(page_url: &str, file_name: &str) -> Option<String> {
    let parsed = Url::parse(page_url).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    Some(format!("{}/{}", normalize_origin(page_url), file_name))
}

/// True for `http://` and `https://` URLs (scheme compared case-insensitively)
pub fn is_absolute_http_url(value: &str) -> bool {
    let lower = value.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// True when `a` and `b` differ, but only by a trailing slash
pub fn differs_only_by_trailing_slash(a: &str, b: &str) -> bool {
    a != b && a.trim_end_matches('/') == b.trim_end_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_standard_url() {
        let url = "https://example.com/path/page?query=true";
        assert_eq!(normalize_origin(url), "https://example.com");
    }

    #[test]
    fn keeps_port_information() {
        let url = "https://example.com:8443/path";
        assert_eq!(normalize_origin(url), "https://example.com:8443");
    }

    #[test]
    fn trims_trailing_slash_when_parse_fails() {
        let url = "example.com/";
        assert_eq!(normalize_origin(url), "example.com");
    }

    #[test]
    fn builds_well_known_urls() {
        assert_eq!(
            well_known_url("https://example.com/blog/post?x=1", "robots.txt").as_deref(),
            Some("https://example.com/robots.txt")
        );
        assert_eq!(
            well_known_url("http://example.com:8080/", "llms.txt").as_deref(),
            Some("http://example.com:8080/llms.txt")
        );
        assert!(well_known_url("ftp://example.com/", "robots.txt").is_none());
        assert!(well_known_url("not a url", "robots.txt").is_none());
    }

    #[test]
    fn detects_absolute_urls() {
        assert!(is_absolute_http_url("https://example.com/a.png"));
        assert!(is_absolute_http_url("HTTP://example.com/a.png"));
        assert!(!is_absolute_http_url("/images/a.png"));
        assert!(!is_absolute_http_url("//cdn.example.com/a.png"));
        assert!(!is_absolute_http_url("data:image/png;base64,AAAA"));
    }

    #[test]
    fn detects_trailing_slash_mismatch() {
        assert!(differs_only_by_trailing_slash("https://a.com/x/", "https://a.com/x"));
        assert!(differs_only_by_trailing_slash("https://a.com/x", "https://a.com/x/"));
        assert!(!differs_only_by_trailing_slash("https://a.com/x", "https://a.com/x"));
        assert!(!differs_only_by_trailing_slash("https://a.com/x", "https://a.com/y"));
    }
}
