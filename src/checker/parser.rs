//! Endpoint parser for candidate `host:port` lists

use crate::checker::models::{Endpoint, ParseReport};
use crate::Result;
use anyhow::Context;
use std::fs;
use std::path::Path;

/// Parser for candidate endpoint lists
pub struct EndpointParser;

impl EndpointParser {
    /// Parse a single candidate line in `host:port` format.
    ///
    /// The split is on the last `:` so bracketed or otherwise colon-bearing
    /// hosts keep their full left part. The host is not validated beyond
    /// being non-empty; an unreachable host simply fails at probe time.
    pub fn parse_line(line: &str) -> Option<Endpoint> {
        let line = line.trim();

        let (host, port) = line.rsplit_once(':')?;
        if host.is_empty() {
            return None;
        }

        let port: u16 = port.parse().ok()?;
        if port == 0 {
            return None;
        }

        Some(Endpoint::new(host.to_string(), port))
    }

    /// Parse a multi-line candidate list, counting rejected lines.
    ///
    /// Blank lines and `#` comments are skipped without counting; any other
    /// line that fails to parse is counted as rejected. A malformed line
    /// never aborts the batch.
    pub fn parse_lines(content: &str) -> ParseReport {
        let mut report = ParseReport::default();

        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            match Self::parse_line(trimmed) {
                Some(endpoint) => report.endpoints.push(endpoint),
                None => report.rejected += 1,
            }
        }

        report
    }

    /// Load and parse a candidate file
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<ParseReport> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read candidate file {:?}", path.as_ref()))?;
        Ok(Self::parse_lines(&content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_line() {
        let endpoint = EndpointParser::parse_line("192.168.1.1:8080").unwrap();
        assert_eq!(endpoint.host, "192.168.1.1");
        assert_eq!(endpoint.port, 8080);
    }

    #[test]
    fn test_parse_splits_on_last_colon() {
        let endpoint = EndpointParser::parse_line("::1:8080").unwrap();
        assert_eq!(endpoint.host, "::1");
        assert_eq!(endpoint.port, 8080);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let endpoint = EndpointParser::parse_line("  10.0.0.1:3128  ").unwrap();
        assert_eq!(endpoint.host, "10.0.0.1");
        assert_eq!(endpoint.port, 3128);
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        assert!(EndpointParser::parse_line("192.168.1.1").is_none());
        assert!(EndpointParser::parse_line("not-an-endpoint").is_none());
    }

    #[test]
    fn test_parse_rejects_bad_port() {
        assert!(EndpointParser::parse_line("192.168.1.1:abc").is_none());
        assert!(EndpointParser::parse_line("192.168.1.1:0").is_none());
        assert!(EndpointParser::parse_line("192.168.1.1:65536").is_none());
        assert!(EndpointParser::parse_line("192.168.1.1:-1").is_none());
    }

    #[test]
    fn test_parse_rejects_empty_host() {
        assert!(EndpointParser::parse_line(":8080").is_none());
    }

    #[test]
    fn test_parse_lines_counts_rejections() {
        let content = r#"
127.0.0.1:9
not-an-endpoint
203.0.113.5:8080

# a comment
"#;
        let report = EndpointParser::parse_lines(content);
        assert_eq!(report.endpoints.len(), 2);
        assert_eq!(report.rejected, 1);
        assert_eq!(report.endpoints[0].to_string(), "127.0.0.1:9");
        assert_eq!(report.endpoints[1].to_string(), "203.0.113.5:8080");
    }

    #[test]
    fn test_parse_lines_is_idempotent() {
        let content = "10.0.0.1:80\nbad line\n10.0.0.2:8080\n";
        let first = EndpointParser::parse_lines(content);
        let second = EndpointParser::parse_lines(content);
        assert_eq!(first.endpoints, second.endpoints);
        assert_eq!(first.rejected, second.rejected);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        assert!(EndpointParser::load_file("/nonexistent/candidates.txt").is_err());
    }
}
