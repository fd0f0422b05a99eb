//! Human-readable progress and console output

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::ports::{OutputConsole, ProgressSink};
use crate::domain::value_objects::ProgressEvent;

/// Target used for publish console lines
pub const CONSOLE_TARGET: &str = "sitesync::console";

/// Console that forwards lines to `tracing` at info level
pub struct TracingConsole;

impl OutputConsole for TracingConsole {
    fn append_line(&self, line: &str) {
        tracing::info!(target: CONSOLE_TARGET, "{}", line);
    }
}

/// Progress sink that logs through `tracing`
pub struct TracingProgressSink;

impl ProgressSink for TracingProgressSink {
    fn on_progress(&self, event: ProgressEvent) {
        match &event.error {
            Some(error) => tracing::warn!(progress = event.progress, %error, "{}", event.message),
            None => tracing::info!(progress = event.progress, "{}", event.message),
        }
    }
}

/// Progress sink printing `[ 40%] message` lines, stderr by default
pub struct TextProgressSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl TextProgressSink {
    pub fn stderr() -> Self {
        Self::with_writer(io::stderr())
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }
}

impl ProgressSink for TextProgressSink {
    fn on_progress(&self, event: ProgressEvent) {
        let Ok(mut writer) = self.writer.lock() else {
            return;
        };
        let _ = match &event.error {
            Some(error) => writeln!(writer, "[{:>3}%] {}: {}", event.progress, event.message, error),
            None => writeln!(writer, "[{:>3}%] {}", event.progress, event.message),
        };
        let _ = writer.flush();
    }
}

/// Keeps every event in memory
#[derive(Default)]
pub struct RecordingProgressSink {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingProgressSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<ProgressEvent> {
        self.events.lock().ok().and_then(|e| e.last().cloned())
    }
}

impl ProgressSink for RecordingProgressSink {
    fn on_progress(&self, event: ProgressEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

/// Keeps every console line in memory
#[derive(Default)]
pub struct RecordingConsole {
    lines: Mutex<Vec<String>>,
}

impl RecordingConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }
}

impl OutputConsole for RecordingConsole {
    fn append_line(&self, line: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line.to_string());
        }
    }
}
