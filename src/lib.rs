//! Proxy Sieve - Concurrent Proxy Liveness Checker
//!
//! Given a candidate list of `host:port` forward proxies, probe each one
//! against a reference URL with bounded concurrency and collect the ones
//! that currently work.

pub mod checker;

pub use checker::*;

/// Application result type
pub type Result<T> = anyhow::Result<T>;
