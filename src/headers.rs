//! Raw HTTP response head parsing.
//!
//! The verifier classifies responses off a textual head block (status line
//! plus header lines), whether that block came off the wire or out of a
//! test fixture.

use std::collections::HashMap;

/// Synthetic key holding the response's first line when the head carried
/// no literal `Status:` header.
pub const STATUS_KEY: &str = "status";

/// Multi-valued header map keyed by lowercased header name.
///
/// Headers may legitimately repeat (`Set-Cookie` being the usual case), so
/// every name maps to its values in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: HashMap<String, Vec<String>>,
}

impl HeaderMap {
    /// Appends a value under the lowercased name.
    pub fn append(&mut self, name: &str, value: &str) {
        self.entries
            .entry(name.to_ascii_lowercase())
            .or_default()
            .push(value.to_string());
    }

    /// First value recorded under the name, if any.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values recorded under the name, in arrival order.
    pub fn all(&self, name: &str) -> &[String] {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_ascii_lowercase())
    }
}

/// Parses a raw response head into a [`HeaderMap`].
///
/// The head is split on CRLF. The first line is the status line; it is
/// stored under [`STATUS_KEY`] only when no literal `Status:` header line
/// is present. Every following `name: value` line is appended under its
/// lowercased name; lines with any other shape are ignored.
pub fn parse_headers(raw: &str) -> HeaderMap {
    let mut headers = HeaderMap::default();
    let mut lines = raw.split("\r\n");

    let status_line = lines.next().unwrap_or("");

    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            if name.is_empty() || name.contains(' ') {
                continue;
            }
            headers.append(name, value.trim());
        }
    }

    if !headers.contains(STATUS_KEY) {
        headers.append(STATUS_KEY, status_line);
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_headers_basic() {
        let head = "HTTP/1.1 301 Moved Permanently\r\nLocation: https://example.com/new\r\nContent-Length: 0\r\n";
        let headers = parse_headers(head);

        assert_eq!(headers.first("location"), Some("https://example.com/new"));
        assert_eq!(headers.first("content-length"), Some("0"));
        assert_eq!(headers.first(STATUS_KEY), Some("HTTP/1.1 301 Moved Permanently"));
    }

    #[test]
    fn test_parse_headers_names_are_lowercased() {
        let headers = parse_headers("HTTP/1.1 200 OK\r\nX-Frame-Options: DENY\r\n");
        assert_eq!(headers.first("x-frame-options"), Some("DENY"));
        assert_eq!(headers.first("X-Frame-Options"), Some("DENY"));
    }

    #[test]
    fn test_parse_headers_repeated_headers_keep_order() {
        let head = "HTTP/1.1 200 OK\r\nSet-Cookie: a=1\r\nSet-Cookie: b=2\r\n";
        let headers = parse_headers(head);

        assert_eq!(headers.all("set-cookie"), ["a=1", "b=2"]);
    }

    #[test]
    fn test_parse_headers_literal_status_header_wins() {
        let head = "HTTP/1.1 200 OK\r\nStatus: 404 Not Found\r\n";
        let headers = parse_headers(head);

        // The literal header is kept; the status line is not layered on top.
        assert_eq!(headers.all(STATUS_KEY), ["404 Not Found"]);
    }

    #[test]
    fn test_parse_headers_ignores_junk_lines() {
        let head = "HTTP/1.1 200 OK\r\nnot a header line\r\nServer: nginx\r\n\r\n";
        let headers = parse_headers(head);

        assert_eq!(headers.first("server"), Some("nginx"));
        assert!(!headers.contains("not a header line"));
    }
}
