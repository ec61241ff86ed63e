// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Attached entry data
//!
//! Payloads are tagged so converters can select on [`PayloadKind`] instead of
//! inspecting runtime types.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Tag identifying the shape of a [`Payload`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    Text,
    Value,
    Error,
    Record,
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PayloadKind::Text => "text",
            PayloadKind::Value => "value",
            PayloadKind::Error => "error",
            PayloadKind::Record => "record",
        };
        f.write_str(name)
    }
}

/// A value attached to a log entry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum Payload {
    Text(String),
    Value(Value),
    Error(ErrorPayload),
    Record(Record),
}

impl Payload {
    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::Text(_) => PayloadKind::Text,
            Payload::Value(_) => PayloadKind::Value,
            Payload::Error(_) => PayloadKind::Error,
            Payload::Record(_) => PayloadKind::Record,
        }
    }

    /// Capture an error and its source chain
    pub fn error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        Payload::Error(ErrorPayload::capture(err))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Value(value)
    }
}

impl From<ErrorPayload> for Payload {
    fn from(error: ErrorPayload) -> Self {
        Payload::Error(error)
    }
}

impl From<Record> for Payload {
    fn from(record: Record) -> Self {
        Payload::Record(record)
    }
}

/// An error captured at emit time
///
/// Errors are not `Clone` in general, so the display text of the error and of
/// each `source()` in its chain is captured instead of the error itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Rust type name of the captured error
    pub type_name: String,
    pub message: String,
    /// Display text of each source, outermost first
    pub chain: Vec<String>,
}

impl ErrorPayload {
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
            chain: Vec::new(),
        }
    }

    pub fn capture<E: std::error::Error + ?Sized>(err: &E) -> Self {
        let mut chain = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            chain.push(cause.to_string());
            source = cause.source();
        }

        Self {
            type_name: std::any::type_name::<E>().to_string(),
            message: err.to_string(),
            chain,
        }
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        for cause in &self.chain {
            write!(f, ": {}", cause)?;
        }
        Ok(())
    }
}

/// A named set of structured fields
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;
