//! Arrival-order accumulation of successful probe outcomes

use crate::checker::models::ProbeOutcome;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Collects successful probe outcomes from all workers.
///
/// Outcomes are held in submission arrival order, which is nondeterministic
/// across runs. The collector is owned by a single run; no state survives
/// between runs.
#[derive(Clone, Default)]
pub struct ResultCollector {
    results: Arc<Mutex<Vec<ProbeOutcome>>>,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an outcome. Safe to call from any number of workers.
    pub async fn submit(&self, outcome: ProbeOutcome) {
        self.results.lock().await.push(outcome);
    }

    /// Drain the accumulated outcomes. Call only after all workers have
    /// finished submitting.
    pub async fn finalize(self) -> Vec<ProbeOutcome> {
        std::mem::take(&mut *self.results.lock().await)
    }
}
