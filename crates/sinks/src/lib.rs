// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Sink implementations for ringlog loggers

pub mod channel;
pub mod forward;
pub mod memory;
pub mod render;
pub mod traced;
pub mod writer;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub mod fake;

pub use channel::{ChannelSink, EntryReceiver, EntrySender};
pub use forward::TracingSink;
pub use memory::MemorySink;
pub use render::{MessageRenderer, RenderError};
pub use traced::{FilterSink, TracedSink};
pub use writer::{read_json_lines, text_line, EntryFormat, WriterSink};

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FailingSink, PanickingSink};
