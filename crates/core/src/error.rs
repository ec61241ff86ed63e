// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types surfaced by the logger in rethrow mode

use crate::convert::ConvertError;
use crate::sink::SinkError;
use thiserror::Error;

/// Failures propagated out of [`Logger::emit`](crate::Logger::emit)
///
/// Only produced when rethrow mode is enabled; otherwise the same failures
/// are reported to the diagnostic channel and swallowed.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("sink {sink} failed on entry {sequence}: {source}")]
    Sink {
        sink: String,
        sequence: i64,
        #[source]
        source: SinkError,
    },
    #[error("sink {sink} panicked on entry {sequence}")]
    SinkPanicked { sink: String, sequence: i64 },
    #[error("converter {converter} failed: {source}")]
    Converter {
        converter: String,
        #[source]
        source: ConvertError,
    },
    #[error("converter {converter} panicked")]
    ConverterPanicked { converter: String },
}
