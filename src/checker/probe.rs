//! Liveness probe: one HTTP GET through a candidate proxy endpoint

use crate::checker::models::{Endpoint, FailureKind, ProbeOutcome};
use async_trait::async_trait;
use reqwest::{Client, Proxy as ReqwestProxy};
use std::time::{Duration, Instant};

/// A single liveness check of one endpoint. One attempt, one outcome,
/// no retries.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, endpoint: &Endpoint) -> ProbeOutcome;
}

/// Probes an endpoint by routing an HTTP GET for a reference URL through it
/// as a forward proxy.
pub struct HttpProber {
    reference_url: String,
    timeout: Duration,
}

impl HttpProber {
    pub fn new(reference_url: String, timeout: Duration) -> Self {
        Self {
            reference_url,
            timeout,
        }
    }

    /// Create a reqwest client routed through the endpoint.
    ///
    /// A fresh client per probe: each probe needs a different proxy
    /// configuration, so no client is shared across endpoints.
    fn create_client(&self, endpoint: &Endpoint) -> reqwest::Result<Client> {
        let proxy = ReqwestProxy::http(endpoint.proxy_url())?;

        Client::builder()
            .proxy(proxy)
            .timeout(self.timeout)
            .build()
    }
}

#[async_trait]
impl Probe for HttpProber {
    async fn probe(&self, endpoint: &Endpoint) -> ProbeOutcome {
        let client = match self.create_client(endpoint) {
            Ok(client) => client,
            Err(e) => {
                log::debug!("{} - client build failed: {}", endpoint, e);
                return ProbeOutcome::failed(endpoint.clone(), FailureKind::ConnectError);
            }
        };

        let start = Instant::now();

        match tokio::time::timeout(self.timeout, client.get(&self.reference_url).send()).await {
            Ok(Ok(response)) => {
                if response.status().is_success() {
                    ProbeOutcome::success(endpoint.clone(), start.elapsed())
                } else {
                    log::debug!("{} - HTTP status: {}", endpoint, response.status());
                    ProbeOutcome::failed(endpoint.clone(), FailureKind::BadStatus)
                }
            }
            Ok(Err(e)) => {
                log::debug!("{} - request error: {}", endpoint, e);
                let kind = if e.is_timeout() {
                    FailureKind::Timeout
                } else {
                    FailureKind::ConnectError
                };
                ProbeOutcome::failed(endpoint.clone(), kind)
            }
            Err(_) => ProbeOutcome::failed(endpoint.clone(), FailureKind::Timeout),
        }
    }
}
