// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log entries and the events callers emit to produce them

use crate::payload::Payload;
use crate::severity::Severity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What a caller hands to [`Logger::emit`](crate::Logger::emit)
///
/// The message is a template; combining it with the arguments is left to
/// sinks (see `ringlog_sinks::MessageRenderer`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Event {
    pub(crate) message: Option<String>,
    pub(crate) arguments: Vec<Value>,
    pub(crate) data: Vec<Payload>,
}

impl Event {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an event with a message template
    pub fn message(template: impl Into<String>) -> Self {
        Self {
            message: Some(template.into()),
            ..Self::default()
        }
    }

    /// Append a substitution argument
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.arguments.push(value.into());
        self
    }

    pub fn args<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.arguments.extend(values.into_iter().map(Into::into));
        self
    }

    /// Attach a payload; it runs through the converter pipeline on emit
    pub fn attach(mut self, payload: impl Into<Payload>) -> Self {
        self.data.push(payload.into());
        self
    }

    /// Attach a captured error
    pub fn error<E: std::error::Error + ?Sized>(self, err: &E) -> Self {
        self.attach(Payload::error(err))
    }
}

impl From<&str> for Event {
    fn from(template: &str) -> Self {
        Event::message(template)
    }
}

impl From<String> for Event {
    fn from(template: String) -> Self {
        Event::message(template)
    }
}

/// One accepted, finalized log event
///
/// Entries are immutable; sinks receive them by reference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    sequence: i64,
    timestamp: DateTime<Utc>,
    severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    log_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    arguments: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    data: Vec<Payload>,
}

impl Entry {
    pub(crate) fn new(
        sequence: i64,
        timestamp: DateTime<Utc>,
        severity: Severity,
        log_id: Option<String>,
        message: Option<String>,
        arguments: Vec<Value>,
        data: Vec<Payload>,
    ) -> Self {
        Self {
            sequence,
            timestamp,
            severity,
            log_id,
            message,
            arguments,
            data,
        }
    }

    pub fn sequence(&self) -> i64 {
        self.sequence
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn log_id(&self) -> Option<&str> {
        self.log_id.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn arguments(&self) -> &[Value] {
        &self.arguments
    }

    /// Attached payloads after conversion
    pub fn data(&self) -> &[Payload] {
        &self.data
    }
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;
