// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Message rendering for text sinks
//!
//! Entries carry a message template and its arguments separately; text sinks
//! combine them here, at output time. Templates use minijinja syntax with the
//! arguments bound to `args`:
//!
//! - Jinja expressions: `{{ args[0] }}`, `{{ args[1] | upper }}`
//! - Positional shorthand: `{0}` is rewritten to `{{ args[0] }}`
//! - `severity` and `log_id` are also in scope

use minijinja::{context, Environment, UndefinedBehavior};
use ringlog_core::Entry;
use thiserror::Error;

/// Errors that can occur while rendering a message
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template syntax error: {0}")]
    Syntax(String),
    #[error("undefined value: {0}")]
    Undefined(String),
    #[error("render error: {0}")]
    Render(String),
}

impl From<minijinja::Error> for RenderError {
    fn from(err: minijinja::Error) -> Self {
        let msg = err.to_string();
        match err.kind() {
            minijinja::ErrorKind::SyntaxError => RenderError::Syntax(msg),
            minijinja::ErrorKind::UndefinedError => RenderError::Undefined(msg),
            _ => RenderError::Render(msg),
        }
    }
}

/// Combines an entry's message template with its arguments
#[derive(Debug, Clone, Default)]
pub struct MessageRenderer {
    strict: bool,
}

impl MessageRenderer {
    /// Renderer where missing arguments render as empty strings
    pub fn new() -> Self {
        Self { strict: false }
    }

    /// Renderer where missing arguments are an error
    pub fn strict() -> Self {
        Self { strict: true }
    }

    fn create_env(&self) -> Environment<'static> {
        let mut env = Environment::new();
        if self.strict {
            env.set_undefined_behavior(UndefinedBehavior::Strict);
        }
        env
    }

    /// Render the entry's message
    pub fn render(&self, entry: &Entry) -> Result<String, RenderError> {
        let Some(template) = entry.message() else {
            return Ok(String::new());
        };
        if !template.contains('{') {
            return Ok(template.to_string());
        }

        let env = self.create_env();
        let expanded = expand_positional(template);
        let rendered = env.render_str(
            &expanded,
            context! {
                args => entry.arguments(),
                severity => entry.severity().as_str(),
                log_id => entry.log_id(),
            },
        )?;
        Ok(rendered)
    }

    /// Render the message, falling back to the raw template on failure
    pub fn render_lossy(&self, entry: &Entry) -> String {
        match self.render(entry) {
            Ok(rendered) => rendered,
            Err(err) => {
                tracing::debug!(error = %err, "message render failed, using raw template");
                entry.message().unwrap_or_default().to_string()
            }
        }
    }
}

/// Rewrite `{N}` placeholders to `{{ args[N] }}`
///
/// Existing `{{ }}`, `{% %}` and `{# #}` blocks are copied unchanged.
fn expand_positional(template: &str) -> String {
    let bytes = template.as_bytes();
    let mut result = String::with_capacity(template.len() + 16);
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'{' {
            let close = match bytes.get(i + 1) {
                Some(b'{') => Some("}}"),
                Some(b'%') => Some("%}"),
                Some(b'#') => Some("#}"),
                _ => None,
            };

            if let Some(close) = close {
                let end = template[i + 2..]
                    .find(close)
                    .map_or(template.len(), |p| i + 2 + p + close.len());
                result.push_str(&template[i..end]);
                i = end;
                continue;
            }

            let digits = bytes[i + 1..]
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .count();
            if digits > 0 && bytes.get(i + 1 + digits) == Some(&b'}') {
                result.push_str("{{ args[");
                result.push_str(&template[i + 1..i + 1 + digits]);
                result.push_str("] }}");
                i += digits + 2;
                continue;
            }
        }

        match template[i..].chars().next() {
            Some(ch) => {
                result.push(ch);
                i += ch.len_utf8();
            }
            None => break,
        }
    }

    result
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
