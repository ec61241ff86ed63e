// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output sink contract

use crate::entry::Entry;
use std::fmt;
use std::io;
use std::sync::Arc;
use thiserror::Error;

/// Errors a sink may report while handling an entry
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("sink closed")]
    Closed,
    #[error("entry rejected: {0}")]
    Rejected(String),
}

/// A registered consumer of log entries
///
/// Sinks own their I/O and may block the emitting thread. The entry is only
/// borrowed for the duration of the call; clone it to keep it.
pub trait Sink: Send + Sync {
    /// Name used when reporting failures
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Handle one entry; `sequence` always equals `entry.sequence()`
    fn handle(&self, entry: &Entry, sequence: i64) -> Result<(), SinkError>;
}

impl<S: Sink + ?Sized> Sink for Arc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn handle(&self, entry: &Entry, sequence: i64) -> Result<(), SinkError> {
        (**self).handle(entry, sequence)
    }
}

/// Handle returned by [`Logger::add_sink`](crate::Logger::add_sink)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SinkId(pub(crate) u64);

impl fmt::Display for SinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sink-{}", self.0)
    }
}
