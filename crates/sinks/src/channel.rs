// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sink forwarding entries into a tokio channel

use ringlog_core::{Entry, Sink, SinkError};
use tokio::sync::mpsc;

/// Sender half used by [`ChannelSink`]
pub type EntrySender = mpsc::UnboundedSender<Entry>;
/// Receiver half returned by [`ChannelSink::new`]
pub type EntryReceiver = mpsc::UnboundedReceiver<Entry>;

/// Hands entries to an async consumer without blocking the emitter
///
/// A dropped receiver turns every delivery into [`SinkError::Closed`].
#[derive(Clone)]
pub struct ChannelSink {
    tx: EntrySender,
}

impl ChannelSink {
    pub fn new() -> (Self, EntryReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn from_sender(tx: EntrySender) -> Self {
        Self { tx }
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl Sink for ChannelSink {
    fn name(&self) -> &str {
        "channel"
    }

    fn handle(&self, entry: &Entry, _sequence: i64) -> Result<(), SinkError> {
        self.tx.send(entry.clone()).map_err(|_| SinkError::Closed)
    }
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;
