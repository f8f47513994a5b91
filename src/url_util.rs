//! URL decomposition shared by the generators and the verifier.

use url::Url;

use crate::error_handling::UrlParseError;

/// A URL broken into the pieces the rest of the crate cares about.
///
/// Root-relative inputs (no scheme or host) are valid; the missing pieces
/// are simply `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    pub scheme: Option<String>,
    pub host: Option<String>,
    pub path: String,
    pub query: Option<String>,
}

/// Decomposes a URL string into scheme/host/path/query.
///
/// Absolute URLs go through the `url` crate. A root-relative input such as
/// `/old?x=1` is split manually into path and query. A malformed URL is an
/// error, distinct from "no scheme/host present".
pub fn parse_url(raw: &str) -> Result<ParsedUrl, UrlParseError> {
    match Url::parse(raw) {
        Ok(parsed) => Ok(ParsedUrl {
            scheme: Some(parsed.scheme().to_string()),
            host: parsed.host_str().map(str::to_string),
            path: parsed.path().to_string(),
            query: parsed.query().map(str::to_string),
        }),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let (path, query) = match raw.split_once('?') {
                Some((path, query)) => (path, Some(query.to_string())),
                None => (raw, None),
            };
            Ok(ParsedUrl {
                scheme: None,
                host: None,
                path: path.to_string(),
                query,
            })
        }
        Err(source) => Err(UrlParseError {
            url: raw.to_string(),
            source,
        }),
    }
}

/// True iff the URL parses and carries both a scheme and a host.
pub fn is_absolute_url(raw: &str) -> bool {
    parse_url(raw)
        .map(|parsed| parsed.scheme.is_some() && parsed.host.is_some())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url_absolute() {
        let parsed = parse_url("https://example.com/old?x=1").unwrap();
        assert_eq!(parsed.scheme.as_deref(), Some("https"));
        assert_eq!(parsed.host.as_deref(), Some("example.com"));
        assert_eq!(parsed.path, "/old");
        assert_eq!(parsed.query.as_deref(), Some("x=1"));
    }

    #[test]
    fn test_parse_url_root_relative() {
        let parsed = parse_url("/old").unwrap();
        assert_eq!(parsed.scheme, None);
        assert_eq!(parsed.host, None);
        assert_eq!(parsed.path, "/old");
        assert_eq!(parsed.query, None);
    }

    #[test]
    fn test_parse_url_root_relative_with_query() {
        let parsed = parse_url("/old?x=1&y=2").unwrap();
        assert_eq!(parsed.path, "/old");
        assert_eq!(parsed.query.as_deref(), Some("x=1&y=2"));
    }

    #[test]
    fn test_parse_url_malformed_is_an_error() {
        // A space is not a valid host character, so this is malformed
        // rather than "no host present".
        assert!(parse_url("http://exa mple.com/").is_err());
    }

    #[test]
    fn test_is_absolute_url() {
        assert!(is_absolute_url("http://example.com"));
        assert!(is_absolute_url("https://example.com/path?q=1"));
        assert!(!is_absolute_url("/old"));
        assert!(!is_absolute_url("old/new"));
        // A scheme alone is not enough; a host is required too.
        assert!(!is_absolute_url("data:text/plain,hello"));
    }
}
