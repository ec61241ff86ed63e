// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic channel for failures inside the logger
//!
//! Failures are reported through `tracing` under [`TARGET`] and counted.
//! Nothing here ever calls back into a [`Logger`](crate::Logger).

use crate::convert::Fault;
use crate::severity::Severity;
use crate::sink::SinkError;
use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};

/// `tracing` target for all diagnostics
pub const TARGET: &str = "ringlog::diagnostics";

/// Point-in-time copy of the logger's counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogStats {
    skipped: [u64; Severity::COUNT],
    written: [u64; Severity::COUNT],
    pub sink_failures: u64,
    pub converter_failures: u64,
    pub conversion_overflows: u64,
}

impl LogStats {
    /// Emits dropped by the threshold at this severity
    pub fn skipped(&self, severity: Severity) -> u64 {
        self.skipped[severity.index()]
    }

    /// Entries written to the backlog at this severity
    pub fn written(&self, severity: Severity) -> u64 {
        self.written[severity.index()]
    }

    pub fn total_written(&self) -> u64 {
        self.written.iter().sum()
    }

    pub fn total_skipped(&self) -> u64 {
        self.skipped.iter().sum()
    }
}

/// Lock-free counters; written counts live under the logger lock instead
#[derive(Default)]
pub(crate) struct Diagnostics {
    skipped: [AtomicU64; Severity::COUNT],
    sink_failures: AtomicU64,
    converter_failures: AtomicU64,
    conversion_overflows: AtomicU64,
}

impl Diagnostics {
    pub fn skipped(&self, severity: Severity) {
        self.skipped[severity.index()].fetch_add(1, Ordering::Relaxed);
    }

    pub fn sink_failed(&self, sink: &str, sequence: i64, error: &SinkError) {
        self.sink_failures.fetch_add(1, Ordering::Relaxed);
        tracing::warn!(target: TARGET, sink, sequence, error = %error, "sink failed");
    }

    pub fn sink_panicked(&self, sink: &str, sequence: i64, panic: &(dyn Any + Send)) {
        self.sink_failures.fetch_add(1, Ordering::Relaxed);
        tracing::warn!(
            target: TARGET,
            sink,
            sequence,
            panic = %panic_message(panic),
            "sink panicked"
        );
    }

    pub fn conversion_fault(&self, sequence: i64, fault: &Fault) {
        match fault {
            Fault::Failed { converter, error } => {
                self.converter_failures.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    target: TARGET,
                    converter = converter.as_str(),
                    sequence,
                    error = %error,
                    "converter failed, payload passed through"
                );
            }
            Fault::Panicked { converter } => {
                self.converter_failures.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    target: TARGET,
                    converter = converter.as_str(),
                    sequence,
                    "converter panicked, payload passed through"
                );
            }
            Fault::Overflow { converter, steps } => {
                self.conversion_overflows.fetch_add(1, Ordering::Relaxed);
                tracing::error!(
                    target: TARGET,
                    converter = converter.as_str(),
                    sequence,
                    steps,
                    "conversion step limit reached"
                );
            }
        }
    }

    pub fn snapshot(&self, written: [u64; Severity::COUNT]) -> LogStats {
        LogStats {
            skipped: std::array::from_fn(|i| self.skipped[i].load(Ordering::Relaxed)),
            written,
            sink_failures: self.sink_failures.load(Ordering::Relaxed),
            converter_failures: self.converter_failures.load(Ordering::Relaxed),
            conversion_overflows: self.conversion_overflows.load(Ordering::Relaxed),
        }
    }
}

/// Best-effort text of a panic payload
pub(crate) fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
