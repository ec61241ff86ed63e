//! Shared helpers for behavioral specs

pub use ringlog_core::{
    Clock, ConfigError, ConvertError, ErrorPayload, ErrorRecordConverter, Event, FakeClock,
    FnConverter, LogConfig, LogError, LogHandle, Logger, Payload, PayloadKind, Record, Severity,
};
pub use ringlog_sinks::{FailingSink, MemorySink, PanickingSink};
pub use serde_json::json;
pub use similar_asserts::assert_eq;

/// A logger on a fake clock, plus helpers for attaching observers
pub struct Harness {
    pub logger: Logger,
    pub clock: FakeClock,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(LogConfig::new())
    }

    pub fn with_config(config: LogConfig) -> Self {
        let clock = FakeClock::new();
        let logger = Logger::with_clock(config, clock.clone()).unwrap();
        Self { logger, clock }
    }

    /// Attach a fresh memory sink and return a handle to its buffer
    pub fn observe(&self) -> MemorySink {
        let sink = MemorySink::new();
        self.logger.add_sink(sink.clone());
        sink
    }

    /// Emit `count` info entries named `msg-N`
    pub fn emit_numbered(&self, count: usize) {
        for i in 0..count {
            self.logger.info(format!("msg-{}", i)).unwrap();
        }
    }
}
