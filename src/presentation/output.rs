//! Output Rendering
//!
//! Chooses the progress sink for a command and prints its result.

use is_terminal::IsTerminal;
use std::sync::Arc;

use serde_json::Value;

use crate::domain::ports::ProgressSink;
use crate::infrastructure::events::{JsonProgressSink, TextProgressSink, TracingProgressSink};

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// NDJSON for scripting
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Progress and result output of one command
pub struct Reporter {
    json: Option<Arc<JsonProgressSink>>,
    sink: Arc<dyn ProgressSink>,
}

impl Reporter {
    /// Text progress goes to stderr when it is a terminal, otherwise to the log
    pub fn new(format: OutputFormat, command: &str) -> Self {
        match format {
            OutputFormat::Json => {
                let json = Arc::new(JsonProgressSink::stdout(command));
                Self {
                    sink: json.clone(),
                    json: Some(json),
                }
            }
            OutputFormat::Text if std::io::stderr().is_terminal() => Self {
                json: None,
                sink: Arc::new(TextProgressSink::stderr()),
            },
            OutputFormat::Text => Self {
                json: None,
                sink: Arc::new(TracingProgressSink),
            },
        }
    }

    pub fn sink(&self) -> Arc<dyn ProgressSink> {
        self.sink.clone()
    }

    /// Print an action result
    pub fn result(&self, value: &Value) {
        match &self.json {
            Some(json) => json.result(value),
            None => println!("{}", render_text(value)),
        }
    }
}

/// Plain rendering of a result value
pub fn render_text(value: &Value) -> String {
    match value {
        Value::Bool(true) => "done".to_string(),
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}
