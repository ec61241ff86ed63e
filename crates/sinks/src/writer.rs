// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line-oriented sink over any `io::Write`

use crate::render::MessageRenderer;
use ringlog_core::{Entry, Sink, SinkError};
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::sync::Mutex;

/// How each entry is laid out on its line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryFormat {
    /// One serde_json document per line
    #[default]
    Json,
    /// `timestamp SEVERITY [log_id] #sequence message data`
    Text,
}

/// Writes one line per entry and flushes after each
pub struct WriterSink<W> {
    writer: Mutex<W>,
    format: EntryFormat,
    renderer: MessageRenderer,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W, format: EntryFormat) -> Self {
        Self {
            writer: Mutex::new(writer),
            format,
            renderer: MessageRenderer::new(),
        }
    }

    /// Use a custom renderer for text output
    pub fn with_renderer(mut self, renderer: MessageRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn format(&self) -> EntryFormat {
        self.format
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    fn line(&self, entry: &Entry) -> Result<String, SinkError> {
        match self.format {
            EntryFormat::Json => Ok(serde_json::to_string(entry)?),
            EntryFormat::Text => Ok(text_line(entry, &self.renderer)),
        }
    }
}

impl WriterSink<io::Stdout> {
    pub fn stdout(format: EntryFormat) -> Self {
        Self::new(io::stdout(), format)
    }
}

impl WriterSink<io::Stderr> {
    pub fn stderr(format: EntryFormat) -> Self {
        Self::new(io::stderr(), format)
    }
}

impl WriterSink<File> {
    /// Append to the file at `path`, creating it if needed
    pub fn append(path: &Path, format: EntryFormat) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file, format))
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn name(&self) -> &str {
        match self.format {
            EntryFormat::Json => "writer-json",
            EntryFormat::Text => "writer-text",
        }
    }

    fn handle(&self, entry: &Entry, _sequence: i64) -> Result<(), SinkError> {
        let line = self.line(entry)?;
        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        writeln!(writer, "{}", line)?;
        writer.flush()?;
        Ok(())
    }
}

/// Format an entry as a single human-readable line
pub fn text_line(entry: &Entry, renderer: &MessageRenderer) -> String {
    let mut line = format!(
        "{} {:<5}",
        entry.timestamp().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        entry.severity().as_str().to_ascii_uppercase(),
    );
    if let Some(log_id) = entry.log_id() {
        line.push_str(&format!(" [{}]", log_id));
    }
    line.push_str(&format!(" #{} {}", entry.sequence(), renderer.render_lossy(entry)));
    for payload in entry.data() {
        let rendered = match payload.as_text() {
            Some(text) => text.to_string(),
            None => serde_json::to_string(payload).unwrap_or_default(),
        };
        line.push_str(" | ");
        line.push_str(&rendered);
    }
    line
}

/// Read back entries written by a JSON-format sink
pub fn read_json_lines(path: &Path) -> Result<Vec<Entry>, SinkError> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut entries = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        entries.push(serde_json::from_str(&line)?);
    }
    Ok(entries)
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;
