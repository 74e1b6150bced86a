//! Bounded worker pool driving probes over a shared work queue

use crate::checker::collector::ResultCollector;
use crate::checker::models::{Endpoint, FailureKind, ProbeOutcome};
use crate::checker::probe::{HttpProber, Probe};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Default timeout for probes in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default worker pool size cap
const DEFAULT_MAX_CONCURRENCY: usize = 50;

/// Default URL to test endpoints against
const DEFAULT_REFERENCE_URL: &str = "https://www.google.com";

/// Configuration for the checker pool
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    /// URL the probes try to reach through each endpoint
    pub reference_url: String,
    /// Timeout for each probe
    pub timeout: Duration,
    /// Worker pool size cap
    pub max_concurrency: usize,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            reference_url: DEFAULT_REFERENCE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

impl CheckerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reference_url(mut self, url: String) -> Self {
        self.reference_url = url;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }
}

/// Per-kind probe counts for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeTally {
    pub probed: usize,
    pub succeeded: usize,
    pub timeouts: usize,
    pub connect_errors: usize,
    pub bad_status: usize,
}

/// Atomic counters shared by the workers
#[derive(Default)]
struct SharedTally {
    probed: AtomicUsize,
    succeeded: AtomicUsize,
    timeouts: AtomicUsize,
    connect_errors: AtomicUsize,
    bad_status: AtomicUsize,
}

impl SharedTally {
    fn record(&self, outcome: &ProbeOutcome) {
        self.probed.fetch_add(1, Ordering::Relaxed);
        match outcome.failure {
            None => self.succeeded.fetch_add(1, Ordering::Relaxed),
            Some(FailureKind::Timeout) => self.timeouts.fetch_add(1, Ordering::Relaxed),
            Some(FailureKind::ConnectError) => self.connect_errors.fetch_add(1, Ordering::Relaxed),
            Some(FailureKind::BadStatus) => self.bad_status.fetch_add(1, Ordering::Relaxed),
        };
    }

    fn snapshot(&self) -> ProbeTally {
        ProbeTally {
            probed: self.probed.load(Ordering::Relaxed),
            succeeded: self.succeeded.load(Ordering::Relaxed),
            timeouts: self.timeouts.load(Ordering::Relaxed),
            connect_errors: self.connect_errors.load(Ordering::Relaxed),
            bad_status: self.bad_status.load(Ordering::Relaxed),
        }
    }
}

/// Result of one pool run: successful outcomes in arrival order plus the
/// probe counts and elapsed wall time
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub results: Vec<ProbeOutcome>,
    pub tally: ProbeTally,
    pub elapsed: Duration,
}

/// Fixed-size worker pool probing endpoints from a shared queue
pub struct CheckerPool {
    config: CheckerConfig,
    prober: Arc<dyn Probe>,
}

impl CheckerPool {
    /// Create a pool with default configuration
    pub fn new() -> Self {
        Self::with_config(CheckerConfig::default())
    }

    /// Create a pool with custom configuration
    pub fn with_config(config: CheckerConfig) -> Self {
        let prober = Arc::new(HttpProber::new(config.reference_url.clone(), config.timeout));
        Self { config, prober }
    }

    /// Create a pool with a custom probe implementation
    pub fn with_prober(config: CheckerConfig, prober: Arc<dyn Probe>) -> Self {
        Self { config, prober }
    }

    /// Probe every endpoint once and collect the working ones
    pub async fn run(&self, endpoints: Vec<Endpoint>) -> RunOutcome {
        self.run_with_cancel(endpoints, CancellationToken::new())
            .await
    }

    /// Variant that accepts a `CancellationToken`. A cancelled token stops
    /// new dequeues; in-flight probes finish naturally or hit their own
    /// timeout, and no partial probe counts as a success.
    pub async fn run_with_cancel(
        &self,
        endpoints: Vec<Endpoint>,
        cancel: CancellationToken,
    ) -> RunOutcome {
        let start = Instant::now();

        // Never spawn workers that would have nothing to dequeue.
        let pool_size = self.config.max_concurrency.min(endpoints.len());
        log::info!(
            "checking {} endpoints with {} workers",
            endpoints.len(),
            pool_size
        );

        let queue = Arc::new(Mutex::new(VecDeque::from(endpoints)));
        let collector = ResultCollector::new();
        let tally = Arc::new(SharedTally::default());
        let mut workers = JoinSet::new();

        for _ in 0..pool_size {
            let queue = Arc::clone(&queue);
            let collector = collector.clone();
            let tally = Arc::clone(&tally);
            let prober = Arc::clone(&self.prober);
            let cancel = cancel.clone();

            workers.spawn(async move {
                loop {
                    if cancel.is_cancelled() {
                        break;
                    }

                    // The guard drops before the probe, so the queue lock
                    // is never held across a suspension point.
                    let next = queue.lock().await.pop_front();
                    let Some(endpoint) = next else { break };

                    let outcome = prober.probe(&endpoint).await;
                    tally.record(&outcome);

                    if outcome.is_success() {
                        log::debug!(
                            "{} - working ({}ms)",
                            outcome.endpoint,
                            outcome.latency.unwrap_or_default().as_millis()
                        );
                        collector.submit(outcome).await;
                    } else if let Some(kind) = outcome.failure {
                        log::debug!("{} - {}", outcome.endpoint, kind);
                    }
                }
            });
        }

        while workers.join_next().await.is_some() {}

        RunOutcome {
            results: collector.finalize().await,
            tally: tally.snapshot(),
            elapsed: start.elapsed(),
        }
    }
}

impl Default for CheckerPool {
    fn default() -> Self {
        Self::new()
    }
}
