// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The log core: filtering, sequencing, conversion, backlog and dispatch
//!
//! All work runs on the emitting thread. A single mutex covers sequence
//! allocation, the backlog write and registry changes; converters and sinks
//! always run outside it.

use crate::backlog::Backlog;
use crate::clock::{Clock, SystemClock};
use crate::config::{ConfigError, LogConfig};
use crate::convert::{Converted, Converter, ConverterId, Fault, Pipeline};
use crate::diagnostics::{Diagnostics, LogStats, TARGET};
use crate::entry::{Entry, Event};
use crate::error::LogError;
use crate::payload::Payload;
use crate::severity::Severity;
use crate::sink::{Sink, SinkId};
use std::num::NonZeroUsize;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

type SinkList = Vec<(SinkId, Arc<dyn Sink>)>;

/// Handle to a log core; clones share the same state
#[derive(Clone)]
pub struct Logger {
    inner: Arc<Inner>,
}

struct Inner {
    clock: Box<dyn Clock>,
    threshold: AtomicU8,
    rethrow: AtomicBool,
    max_conversion_steps: usize,
    diagnostics: Diagnostics,
    state: Mutex<State>,
}

struct State {
    next_sequence: i64,
    next_handle: u64,
    log_id: Option<String>,
    backlog: Backlog,
    sinks: SinkList,
    converters: Vec<(ConverterId, Arc<dyn Converter>)>,
    written: [u64; Severity::COUNT],
}

impl Logger {
    /// Create a logger stamping entries with the system clock
    pub fn new(config: LogConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, SystemClock)
    }

    pub fn with_clock(config: LogConfig, clock: impl Clock + 'static) -> Result<Self, ConfigError> {
        config.validate()?;
        let capacity = NonZeroUsize::new(config.capacity).ok_or(ConfigError::ZeroCapacity)?;

        let state = State {
            next_sequence: 0,
            next_handle: 1,
            log_id: config.log_id,
            backlog: Backlog::new(capacity),
            sinks: Vec::new(),
            converters: Vec::new(),
            written: [0; Severity::COUNT],
        };

        Ok(Self {
            inner: Arc::new(Inner {
                clock: Box::new(clock),
                threshold: AtomicU8::new(config.threshold as u8),
                rethrow: AtomicBool::new(config.rethrow),
                max_conversion_steps: config.max_conversion_steps,
                diagnostics: Diagnostics::default(),
                state: Mutex::new(state),
            }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.inner.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn trace(&self, event: impl Into<Event>) -> Result<Option<i64>, LogError> {
        self.emit(Severity::Trace, event)
    }

    pub fn info(&self, event: impl Into<Event>) -> Result<Option<i64>, LogError> {
        self.emit(Severity::Info, event)
    }

    pub fn warn(&self, event: impl Into<Event>) -> Result<Option<i64>, LogError> {
        self.emit(Severity::Warn, event)
    }

    pub fn error(&self, event: impl Into<Event>) -> Result<Option<i64>, LogError> {
        self.emit(Severity::Error, event)
    }

    /// Emit an event at the given severity
    ///
    /// Returns the entry's sequence number, or `None` if the threshold
    /// filtered it. Errors are only returned in rethrow mode, and a converter
    /// failure is only returned after the entry has been stored and
    /// dispatched.
    pub fn emit(&self, severity: Severity, event: impl Into<Event>) -> Result<Option<i64>, LogError> {
        if !severity.passes(self.threshold()) {
            self.inner.diagnostics.skipped(severity);
            return Ok(None);
        }

        let Event {
            message,
            arguments,
            data,
        } = event.into();
        let timestamp = self.inner.clock.utc_now();
        let rethrow = self.rethrow();

        let (sequence, pipeline) = {
            let mut state = self.lock();
            let sequence = state.next_sequence;
            state.next_sequence += 1;
            let converters = if data.is_empty() {
                Vec::new()
            } else {
                state.converters.iter().map(|(_, c)| Arc::clone(c)).collect()
            };
            (sequence, Pipeline::new(converters, self.inner.max_conversion_steps))
        };

        let (data, conversion_error) = self.convert(sequence, data, &pipeline);

        let (entry, sinks) = {
            let mut state = self.lock();
            state.written[severity.index()] += 1;
            let entry = Arc::new(Entry::new(
                sequence,
                timestamp,
                severity,
                state.log_id.clone(),
                message,
                arguments,
                data,
            ));
            if !state.backlog.insert(Arc::clone(&entry)) {
                tracing::debug!(target: TARGET, sequence, "entry lapped before backlog write");
            }
            // Taken with the backlog write so a concurrent add_sink sees the
            // entry either in its replay or here, never both.
            (entry, state.sinks.clone())
        };

        for (_, sink) in &sinks {
            if let Err(err) = self.deliver(sink.as_ref(), &entry) {
                if rethrow {
                    return Err(conversion_error.unwrap_or(err));
                }
            }
        }

        match conversion_error {
            Some(err) if rethrow => Err(err),
            _ => Ok(Some(sequence)),
        }
    }

    /// Run attached payloads through the pipeline
    ///
    /// A faulted payload is passed through as attached. The first converter
    /// failure is returned alongside the data so rethrow mode can report it
    /// once the entry has been stored and dispatched.
    fn convert(
        &self,
        sequence: i64,
        data: Vec<Payload>,
        pipeline: &Pipeline,
    ) -> (Vec<Payload>, Option<LogError>) {
        if pipeline.is_empty() {
            return (data, None);
        }

        let mut first_error = None;
        let mut converted = Vec::with_capacity(data.len());
        for payload in data {
            let Converted { payload, fault } = pipeline.run(payload);
            if let Some(fault) = fault {
                self.inner.diagnostics.conversion_fault(sequence, &fault);
                let err = match fault {
                    Fault::Failed { converter, error } => Some(LogError::Converter {
                        converter,
                        source: error,
                    }),
                    Fault::Panicked { converter } => Some(LogError::ConverterPanicked { converter }),
                    Fault::Overflow { .. } => None,
                };
                if first_error.is_none() {
                    first_error = err;
                }
            }
            converted.push(payload);
        }
        (converted, first_error)
    }

    /// Hand one entry to one sink, reporting any failure
    fn deliver(&self, sink: &dyn Sink, entry: &Entry) -> Result<(), LogError> {
        let sequence = entry.sequence();
        match catch_unwind(AssertUnwindSafe(|| sink.handle(entry, sequence))) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(source)) => {
                self.inner
                    .diagnostics
                    .sink_failed(sink.name(), sequence, &source);
                Err(LogError::Sink {
                    sink: sink.name().to_string(),
                    sequence,
                    source,
                })
            }
            Err(panic) => {
                self.inner
                    .diagnostics
                    .sink_panicked(sink.name(), sequence, panic.as_ref());
                Err(LogError::SinkPanicked {
                    sink: sink.name().to_string(),
                    sequence,
                })
            }
        }
    }

    /// Register a sink and replay the backlog to it
    ///
    /// Replay happens after the lock is released and never fails the call,
    /// even in rethrow mode. Entries emitted concurrently may reach the sink
    /// before its replay completes.
    pub fn add_sink(&self, sink: impl Sink + 'static) -> SinkId {
        let sink: Arc<dyn Sink> = Arc::new(sink);

        let (id, backlog) = {
            let mut state = self.lock();
            let id = SinkId(state.next_handle);
            state.next_handle += 1;
            state.sinks.push((id, Arc::clone(&sink)));
            (id, state.backlog.snapshot())
        };

        tracing::debug!(
            target: TARGET,
            sink = sink.name(),
            %id,
            replay = backlog.len(),
            "sink attached"
        );

        for entry in &backlog {
            let _ = self.deliver(sink.as_ref(), entry);
        }

        id
    }

    /// Unregister a sink; returns whether it was registered
    ///
    /// Dispatches already in flight may still deliver to it.
    pub fn remove_sink(&self, id: SinkId) -> bool {
        let removed = {
            let mut state = self.lock();
            let before = state.sinks.len();
            state.sinks.retain(|(sink_id, _)| *sink_id != id);
            state.sinks.len() != before
        };
        if removed {
            tracing::debug!(target: TARGET, %id, "sink detached");
        }
        removed
    }

    pub fn sink_count(&self) -> usize {
        self.lock().sinks.len()
    }

    /// Append a converter; earlier registrations take precedence
    pub fn add_converter(&self, converter: impl Converter + 'static) -> ConverterId {
        let mut state = self.lock();
        let id = ConverterId(state.next_handle);
        state.next_handle += 1;
        state.converters.push((id, Arc::new(converter)));
        id
    }

    pub fn remove_converter(&self, id: ConverterId) -> bool {
        let mut state = self.lock();
        let before = state.converters.len();
        state.converters.retain(|(converter_id, _)| *converter_id != id);
        state.converters.len() != before
    }

    pub fn threshold(&self) -> Severity {
        let raw = self.inner.threshold.load(Ordering::Relaxed);
        Severity::from_index(raw as usize).unwrap_or_default()
    }

    pub fn set_threshold(&self, threshold: Severity) {
        self.inner
            .threshold
            .store(threshold as u8, Ordering::Relaxed);
    }

    pub fn rethrow(&self) -> bool {
        self.inner.rethrow.load(Ordering::Relaxed)
    }

    /// Propagate sink and converter failures out of `emit` (tests/debugging)
    pub fn set_rethrow(&self, rethrow: bool) {
        self.inner.rethrow.store(rethrow, Ordering::Relaxed);
    }

    pub fn log_id(&self) -> Option<String> {
        self.lock().log_id.clone()
    }

    pub fn set_log_id(&self, log_id: Option<String>) {
        self.lock().log_id = log_id;
    }

    pub fn capacity(&self) -> usize {
        self.lock().backlog.capacity()
    }

    /// Entries currently retained for replay, oldest first
    pub fn backlog(&self) -> Vec<Arc<Entry>> {
        self.lock().backlog.snapshot()
    }

    pub fn stats(&self) -> LogStats {
        let written = self.lock().written;
        self.inner.diagnostics.snapshot(written)
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("Logger")
            .field("threshold", &self.threshold())
            .field("log_id", &state.log_id)
            .field("capacity", &state.backlog.capacity())
            .field("next_sequence", &state.next_sequence)
            .field("sinks", &state.sinks.len())
            .field("converters", &state.converters.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "logger_tests.rs"]
mod tests;
