// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sink wrappers for observability and per-sink filtering

use ringlog_core::{Entry, Severity, Sink, SinkError};

/// Wrapper that adds a span and timing around any sink
#[derive(Clone)]
pub struct TracedSink<S> {
    inner: S,
}

impl<S> TracedSink<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: Sink> Sink for TracedSink<S> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn handle(&self, entry: &Entry, sequence: i64) -> Result<(), SinkError> {
        let span = tracing::debug_span!("sink.handle", sink = self.inner.name(), sequence);
        let _guard = span.enter();

        let start = std::time::Instant::now();
        let result = self.inner.handle(entry, sequence);
        let elapsed = start.elapsed();

        match &result {
            Ok(()) => tracing::trace!(elapsed_us = elapsed.as_micros() as u64, "delivered"),
            Err(e) => tracing::debug!(
                elapsed_us = elapsed.as_micros() as u64,
                error = %e,
                "delivery failed"
            ),
        }

        result
    }
}

/// Wrapper that only forwards entries at or above its own minimum
///
/// Filtered entries count as delivered.
#[derive(Clone)]
pub struct FilterSink<S> {
    inner: S,
    min: Severity,
}

impl<S> FilterSink<S> {
    pub fn new(inner: S, min: Severity) -> Self {
        Self { inner, min }
    }

    pub fn min(&self) -> Severity {
        self.min
    }
}

impl<S: Sink> Sink for FilterSink<S> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn handle(&self, entry: &Entry, sequence: i64) -> Result<(), SinkError> {
        if !entry.severity().passes(self.min) {
            return Ok(());
        }
        self.inner.handle(entry, sequence)
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
