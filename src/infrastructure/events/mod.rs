//! Progress Sink Implementations
//!
//! Concrete implementations of ProgressSink and OutputConsole:
//! - JsonProgressSink: NDJSON output for CI/automation
//! - TextProgressSink: `[ 40%] message` lines for terminals
//! - TracingProgressSink / TracingConsole: route through `tracing`
//! - Recording*: in-memory capture

mod console;
mod json;

pub use console::{
    RecordingConsole, RecordingProgressSink, TextProgressSink, TracingConsole,
    TracingProgressSink, CONSOLE_TARGET,
};
pub use json::JsonProgressSink;
