// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sink that re-emits entries as `tracing` events

use crate::render::MessageRenderer;
use ringlog_core::{Entry, Severity, Sink, SinkError};

/// `tracing` target forwarded entries are emitted under
pub const TARGET: &str = "ringlog::entries";

/// Bridges entries into whatever `tracing` subscriber is installed
#[derive(Debug, Clone, Default)]
pub struct TracingSink {
    renderer: MessageRenderer,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_renderer(renderer: MessageRenderer) -> Self {
        Self { renderer }
    }
}

impl Sink for TracingSink {
    fn name(&self) -> &str {
        "tracing"
    }

    fn handle(&self, entry: &Entry, sequence: i64) -> Result<(), SinkError> {
        let message = self.renderer.render_lossy(entry);
        let log_id = entry.log_id().unwrap_or_default();
        let attached = entry.data().len();

        match entry.severity() {
            Severity::Trace => {
                tracing::trace!(target: TARGET, sequence, log_id, attached, "{}", message)
            }
            Severity::Info => {
                tracing::info!(target: TARGET, sequence, log_id, attached, "{}", message)
            }
            Severity::Warn => {
                tracing::warn!(target: TARGET, sequence, log_id, attached, "{}", message)
            }
            Severity::Error => {
                tracing::error!(target: TARGET, sequence, log_id, attached, "{}", message)
            }
        }
        Ok(())
    }
}
