//! JSON Progress Sink
//!
//! Outputs progress events as NDJSON for CI/automation consumption.

use crate::domain::ports::ProgressSink;
use crate::domain::value_objects::ProgressEvent;
use std::io::{self, Write};
use std::sync::Mutex;

/// Progress sink that outputs NDJSON events to stdout
pub struct JsonProgressSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
    command: String,
}

impl JsonProgressSink {
    /// Create a new JSON sink writing to stdout
    pub fn stdout(command: impl Into<String>) -> Self {
        Self::with_writer(command, io::stdout())
    }

    /// Create a JSON sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(command: impl Into<String>, writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            command: command.into(),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }

    /// Emit the action result as the closing line of the stream
    pub fn result(&self, result: &serde_json::Value) {
        self.write_event(serde_json::json!({
            "event": "result",
            "command": self.command,
            "result": result,
        }));
    }
}

impl ProgressSink for JsonProgressSink {
    fn on_progress(&self, event: ProgressEvent) {
        let kind = if event.error.is_some() {
            "error"
        } else if event.complete {
            "complete"
        } else {
            "progress"
        };
        let mut json = serde_json::json!({
            "event": kind,
            "command": self.command,
        });
        if let (Some(obj), Ok(serde_json::Value::Object(fields))) =
            (json.as_object_mut(), serde_json::to_value(&event))
        {
            obj.extend(fields);
        }
        self.write_event(json);
    }
}
