//! Endpoint and probe outcome models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// A candidate forward-proxy address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: String, port: u16) -> Self {
        Self { host, port }
    }

    /// Get the proxy URL used to route requests through this endpoint
    pub fn proxy_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Why a probe did not succeed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// No response before the probe timeout elapsed
    Timeout,
    /// The connection could not be established (refused, DNS failure, reset)
    ConnectError,
    /// A response arrived with a status outside 200-299
    BadStatus,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::ConnectError => write!(f, "connect error"),
            FailureKind::BadStatus => write!(f, "bad status"),
        }
    }
}

/// Classified result of probing a single endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeOutcome {
    pub endpoint: Endpoint,
    pub latency: Option<Duration>,
    pub failure: Option<FailureKind>,
}

impl ProbeOutcome {
    pub fn success(endpoint: Endpoint, latency: Duration) -> Self {
        Self {
            endpoint,
            latency: Some(latency),
            failure: None,
        }
    }

    pub fn failed(endpoint: Endpoint, kind: FailureKind) -> Self {
        Self {
            endpoint,
            latency: None,
            failure: Some(kind),
        }
    }

    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Result of parsing a candidate list: the endpoints plus a count of
/// rejected lines
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    pub endpoints: Vec<Endpoint>,
    pub rejected: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_creation() {
        let endpoint = Endpoint::new("127.0.0.1".to_string(), 8080);
        assert_eq!(endpoint.host, "127.0.0.1");
        assert_eq!(endpoint.port, 8080);
    }

    #[test]
    fn test_endpoint_display() {
        let endpoint = Endpoint::new("127.0.0.1".to_string(), 8080);
        assert_eq!(endpoint.to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_endpoint_proxy_url() {
        let endpoint = Endpoint::new("192.168.1.1".to_string(), 3128);
        assert_eq!(endpoint.proxy_url(), "http://192.168.1.1:3128");
    }

    #[test]
    fn test_probe_outcome_success() {
        let endpoint = Endpoint::new("127.0.0.1".to_string(), 8080);
        let outcome = ProbeOutcome::success(endpoint, Duration::from_millis(120));
        assert!(outcome.is_success());
        assert_eq!(outcome.latency, Some(Duration::from_millis(120)));
        assert!(outcome.failure.is_none());
    }

    #[test]
    fn test_probe_outcome_failed() {
        let endpoint = Endpoint::new("127.0.0.1".to_string(), 8080);

        let outcome = ProbeOutcome::failed(endpoint.clone(), FailureKind::Timeout);
        assert!(!outcome.is_success());
        assert_eq!(outcome.failure, Some(FailureKind::Timeout));
        assert!(outcome.latency.is_none());

        let outcome = ProbeOutcome::failed(endpoint.clone(), FailureKind::ConnectError);
        assert!(!outcome.is_success());

        let outcome = ProbeOutcome::failed(endpoint, FailureKind::BadStatus);
        assert!(!outcome.is_success());
    }
}
