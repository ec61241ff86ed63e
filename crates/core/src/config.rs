// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Logger configuration
//!
//! Loaded from TOML or built in code:
//!
//! ```toml
//! threshold = "info"
//! capacity = 50
//! log_id = "api"
//! rethrow = false
//! max_conversion_steps = 32
//! ```

use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

/// Default number of entries kept for replay to late sinks
pub const DEFAULT_CAPACITY: usize = 50;

/// Default bound on converter chain length per payload
pub const DEFAULT_MAX_CONVERSION_STEPS: usize = 32;

/// Errors loading or validating a [`LogConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("backlog capacity must be at least 1")]
    ZeroCapacity,
    #[error("max_conversion_steps must be at least 1")]
    ZeroConversionSteps,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// Minimum severity that produces an entry
    pub threshold: Severity,
    /// Ring backlog size
    pub capacity: usize,
    /// Logical log stream stamped on every entry
    pub log_id: Option<String>,
    /// Propagate sink and converter failures out of `emit`
    pub rethrow: bool,
    pub max_conversion_steps: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            threshold: Severity::Trace,
            capacity: DEFAULT_CAPACITY,
            log_id: None,
            rethrow: false,
            max_conversion_steps: DEFAULT_MAX_CONVERSION_STEPS,
        }
    }
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: LogConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.max_conversion_steps == 0 {
            return Err(ConfigError::ZeroConversionSteps);
        }
        Ok(())
    }

    pub fn with_threshold(mut self, threshold: Severity) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_log_id(mut self, log_id: impl Into<String>) -> Self {
        self.log_id = Some(log_id.into());
        self
    }

    pub fn with_rethrow(mut self, rethrow: bool) -> Self {
        self.rethrow = rethrow;
        self
    }

    pub fn with_max_conversion_steps(mut self, steps: usize) -> Self {
        self.max_conversion_steps = steps;
        self
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
