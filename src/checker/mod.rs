//! Checker module for validating proxy endpoints
//!
//! This module provides functionality for:
//! - Parsing candidate endpoints from `host:port` lines
//! - Probing each endpoint through an HTTP GET to a reference URL
//! - Running probes through a bounded worker pool over a shared queue
//! - Persisting working endpoints to a flat output file

pub mod collector;
pub mod models;
pub mod parser;
pub mod pool;
pub mod probe;
pub mod reporter;

pub use collector::ResultCollector;
pub use models::{Endpoint, FailureKind, ParseReport, ProbeOutcome};
pub use parser::EndpointParser;
pub use pool::{CheckerConfig, CheckerPool, ProbeTally, RunOutcome};
pub use probe::{HttpProber, Probe};
pub use reporter::{Reporter, RunStats};
