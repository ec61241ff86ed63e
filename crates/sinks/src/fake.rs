// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Misbehaving sinks for exercising failure isolation
#![cfg_attr(coverage_nightly, coverage(off))]

use ringlog_core::{Entry, Sink, SinkError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Sink that rejects every entry and counts the attempts
#[derive(Clone, Default)]
pub struct FailingSink {
    attempts: Arc<AtomicUsize>,
}

impl FailingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries this sink was handed
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl Sink for FailingSink {
    fn name(&self) -> &str {
        "failing"
    }

    fn handle(&self, _entry: &Entry, sequence: i64) -> Result<(), SinkError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(SinkError::Rejected(format!("entry {} rejected", sequence)))
    }
}

/// Sink that panics on every entry and counts the attempts
#[derive(Clone, Default)]
pub struct PanickingSink {
    attempts: Arc<AtomicUsize>,
}

impl PanickingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl Sink for PanickingSink {
    fn name(&self) -> &str {
        "panicking"
    }

    #[allow(clippy::panic)]
    fn handle(&self, _entry: &Entry, sequence: i64) -> Result<(), SinkError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        panic!("sink exploded on entry {}", sequence);
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
