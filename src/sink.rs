// src/sink.rs

//! Log sink collaborator.
//!
//! Hook and connector output is an ordered sequence of human-readable
//! lines aimed at the operator reviewing a node's connection log. All
//! outcomes — success, skip notices, failures — land here, so provisioning
//! problems can be diagnosed without extra tooling. Diagnostics go to
//! `tracing` (stderr) instead, keeping the sink clean.

use std::sync::Arc;

/// Ordered line-oriented output for one node operation.
pub trait LogSink: Send + Sync {
    fn line(&self, line: &str);
}

/// Production sink: hook/connector output on stdout.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl LogSink for StdoutSink {
    fn line(&self, line: &str) {
        println!("{line}");
    }
}

/// Shared handle used throughout the crate.
pub type SharedSink = Arc<dyn LogSink>;
