//! Output Console Port
//!
//! Human-readable log lines shown next to a running publish. Supplementary
//! only: errors are always returned, never just printed.

/// Line-oriented console for publish output
pub trait OutputConsole: Send + Sync {
    fn append_line(&self, line: &str);
}

/// Console that discards everything
pub struct NoopConsole;

impl OutputConsole for NoopConsole {
    fn append_line(&self, _line: &str) {}
}
