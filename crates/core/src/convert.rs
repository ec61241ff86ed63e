// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Payload converters and the conversion pipeline
//!
//! Each attached payload is handed to the first registered converter that
//! accepts it, and the result is fed back in until no converter accepts it.

use crate::payload::{Payload, PayloadKind, Record};
use serde_json::Value;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use thiserror::Error;

/// Errors a converter may report
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    #[error("cannot convert {0} payload")]
    Unsupported(PayloadKind),
    #[error("conversion failed: {0}")]
    Failed(String),
}

/// A registered transform over attached payloads
pub trait Converter: Send + Sync {
    /// Name used when reporting failures
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn can_convert(&self, payload: &Payload) -> bool;

    fn convert(&self, payload: &Payload) -> Result<Payload, ConvertError>;
}

impl<C: Converter + ?Sized> Converter for Arc<C> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn can_convert(&self, payload: &Payload) -> bool {
        (**self).can_convert(payload)
    }

    fn convert(&self, payload: &Payload) -> Result<Payload, ConvertError> {
        (**self).convert(payload)
    }
}

/// Handle returned by [`Logger::add_converter`](crate::Logger::add_converter)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConverterId(pub(crate) u64);

impl fmt::Display for ConverterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "converter-{}", self.0)
    }
}

/// Converter built from a closure, accepting every payload of one kind
pub struct FnConverter<F> {
    name: String,
    kind: PayloadKind,
    f: F,
}

impl<F> FnConverter<F>
where
    F: Fn(&Payload) -> Result<Payload, ConvertError> + Send + Sync,
{
    pub fn new(name: impl Into<String>, kind: PayloadKind, f: F) -> Self {
        Self {
            name: name.into(),
            kind,
            f,
        }
    }
}

impl<F> Converter for FnConverter<F>
where
    F: Fn(&Payload) -> Result<Payload, ConvertError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn can_convert(&self, payload: &Payload) -> bool {
        payload.kind() == self.kind
    }

    fn convert(&self, payload: &Payload) -> Result<Payload, ConvertError> {
        (self.f)(payload)
    }
}

/// Turns captured errors into structured records
///
/// The record is named after the error type, with `message` and `chain`
/// fields.
#[derive(Clone, Debug, Default)]
pub struct ErrorRecordConverter;

impl Converter for ErrorRecordConverter {
    fn name(&self) -> &str {
        "error-record"
    }

    fn can_convert(&self, payload: &Payload) -> bool {
        payload.kind() == PayloadKind::Error
    }

    fn convert(&self, payload: &Payload) -> Result<Payload, ConvertError> {
        let Payload::Error(error) = payload else {
            return Err(ConvertError::Unsupported(payload.kind()));
        };
        let chain: Vec<Value> = error.chain.iter().cloned().map(Value::String).collect();
        Ok(Record::new(error.type_name.clone())
            .with_field("message", error.message.clone())
            .with_field("chain", chain)
            .into())
    }
}

/// Why a payload left the pipeline before reaching a final form
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Fault {
    Failed {
        converter: String,
        error: ConvertError,
    },
    Panicked {
        converter: String,
    },
    /// The step limit was hit while `converter` still accepted the item
    Overflow {
        converter: String,
        steps: usize,
    },
}

/// Result of running one payload through the pipeline
#[derive(Debug)]
pub(crate) struct Converted {
    /// The final item, or the original one if a fault stopped conversion
    pub payload: Payload,
    pub fault: Option<Fault>,
}

impl Converted {
    fn faulted(original: Payload, fault: Fault) -> Self {
        Self {
            payload: original,
            fault: Some(fault),
        }
    }
}

/// A snapshot of the registered converters, run outside the logger lock
pub(crate) struct Pipeline {
    converters: Vec<Arc<dyn Converter>>,
    max_steps: usize,
}

impl Pipeline {
    pub fn new(converters: Vec<Arc<dyn Converter>>, max_steps: usize) -> Self {
        Self {
            converters,
            max_steps,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    /// Convert one payload until no converter accepts it
    ///
    /// Any fault discards intermediate results and returns the payload as
    /// originally attached.
    pub fn run(&self, original: Payload) -> Converted {
        let mut current: Option<Payload> = None;
        let mut steps = 0;

        loop {
            let item = current.as_ref().unwrap_or(&original);
            let converter = match self.find(item) {
                Ok(Some(converter)) => converter,
                Ok(None) => {
                    return Converted {
                        payload: current.unwrap_or(original),
                        fault: None,
                    }
                }
                Err(fault) => return Converted::faulted(original, fault),
            };

            if steps >= self.max_steps {
                let fault = Fault::Overflow {
                    converter: converter.name().to_string(),
                    steps,
                };
                return Converted::faulted(original, fault);
            }

            match catch_unwind(AssertUnwindSafe(|| converter.convert(item))) {
                Ok(Ok(next)) => {
                    current = Some(next);
                    steps += 1;
                }
                Ok(Err(error)) => {
                    let fault = Fault::Failed {
                        converter: converter.name().to_string(),
                        error,
                    };
                    return Converted::faulted(original, fault);
                }
                Err(_) => {
                    let fault = Fault::Panicked {
                        converter: converter.name().to_string(),
                    };
                    return Converted::faulted(original, fault);
                }
            }
        }
    }

    /// First converter, in registration order, that accepts the item
    fn find(&self, item: &Payload) -> Result<Option<&Arc<dyn Converter>>, Fault> {
        for converter in &self.converters {
            match catch_unwind(AssertUnwindSafe(|| converter.can_convert(item))) {
                Ok(true) => return Ok(Some(converter)),
                Ok(false) => {}
                Err(_) => {
                    return Err(Fault::Panicked {
                        converter: converter.name().to_string(),
                    })
                }
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
#[path = "convert_tests.rs"]
mod tests;
