// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Injectable logging handle for call sites
//!
//! Components take a `LogHandle` at construction instead of reaching for a
//! process-wide logger. A disabled handle drops everything.

use crate::diagnostics::TARGET;
use crate::entry::Event;
use crate::logger::Logger;
use crate::severity::Severity;

#[derive(Clone, Debug, Default)]
pub struct LogHandle {
    logger: Option<Logger>,
}

impl LogHandle {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger: Some(logger),
        }
    }

    /// A handle that discards every event
    pub fn disabled() -> Self {
        Self { logger: None }
    }

    pub fn logger(&self) -> Option<&Logger> {
        self.logger.as_ref()
    }

    pub fn is_enabled(&self, severity: Severity) -> bool {
        self.logger
            .as_ref()
            .is_some_and(|logger| severity.passes(logger.threshold()))
    }

    /// Emit without surfacing errors
    ///
    /// In rethrow mode the logger's error is reported to the diagnostic
    /// channel instead of being returned.
    pub fn emit(&self, severity: Severity, event: impl Into<Event>) -> Option<i64> {
        let logger = self.logger.as_ref()?;
        match logger.emit(severity, event) {
            Ok(sequence) => sequence,
            Err(err) => {
                tracing::warn!(target: TARGET, error = %err, "emit failed in rethrow mode");
                None
            }
        }
    }

    pub fn trace(&self, event: impl Into<Event>) -> Option<i64> {
        self.emit(Severity::Trace, event)
    }

    pub fn info(&self, event: impl Into<Event>) -> Option<i64> {
        self.emit(Severity::Info, event)
    }

    pub fn warn(&self, event: impl Into<Event>) -> Option<i64> {
        self.emit(Severity::Warn, event)
    }

    pub fn error(&self, event: impl Into<Event>) -> Option<i64> {
        self.emit(Severity::Error, event)
    }
}

impl From<Logger> for LogHandle {
    fn from(logger: Logger) -> Self {
        Self::new(logger)
    }
}

#[cfg(test)]
#[path = "handle_tests.rs"]
mod tests;
