// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ringlog-core: severity-filtered structured logging core
//!
//! This crate provides:
//! - `Logger` - sequences, filters and fans out entries to registered sinks
//! - A ring backlog replayed to sinks attached after startup
//! - A converter pipeline over attached payloads
//! - `LogHandle` - an injectable facade for call sites

pub mod clock;

pub mod backlog;
pub mod config;
pub mod convert;
pub mod diagnostics;
pub mod entry;
pub mod error;
pub mod handle;
pub mod logger;
pub mod payload;
pub mod severity;
pub mod sink;

// Re-exports
pub use backlog::Backlog;
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, LogConfig, DEFAULT_CAPACITY, DEFAULT_MAX_CONVERSION_STEPS};
pub use convert::{ConvertError, Converter, ConverterId, ErrorRecordConverter, FnConverter};
pub use diagnostics::LogStats;
pub use entry::{Entry, Event};
pub use error::LogError;
pub use handle::LogHandle;
pub use logger::Logger;
pub use payload::{ErrorPayload, Payload, PayloadKind, Record};
pub use severity::{Severity, SeverityParseError};
pub use sink::{Sink, SinkError, SinkId};
