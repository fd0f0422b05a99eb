//! Progress Port
//!
//! Fire-and-forget progress reporting. Emitting never blocks the pipeline
//! and an unobserved event is not an error.
//!
//! Implementations:
//! - `NoopProgressSink`: silent operation
//! - `JsonProgressSink`: NDJSON stream for automation
//! - `TracingProgressSink`: human-readable lines through `tracing`
//! - any `Fn(ProgressEvent)` closure

use crate::domain::value_objects::ProgressEvent;

/// Receiver of progress events
pub trait ProgressSink: Send + Sync {
    fn on_progress(&self, event: ProgressEvent);
}

impl<F> ProgressSink for F
where
    F: Fn(ProgressEvent) + Send + Sync,
{
    fn on_progress(&self, event: ProgressEvent) {
        self(event)
    }
}

/// Progress sink that drops every event
pub struct NoopProgressSink;

impl ProgressSink for NoopProgressSink {
    fn on_progress(&self, _event: ProgressEvent) {}
}
