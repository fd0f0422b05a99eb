//! Progress event value object
//!
//! Transient, never persisted. Emitted zero or more times per dispatch;
//! the last event carries `complete` or `error`.

use serde::Serialize;

/// A progress report from a running action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    pub message: String,
    /// Percentage, clamped to 0..=100
    pub progress: u8,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProgressEvent {
    /// Intermediate step
    pub fn step(message: impl Into<String>, progress: u8) -> Self {
        Self {
            message: message.into(),
            progress: progress.min(100),
            complete: false,
            error: None,
        }
    }

    /// Final event of a successful action
    pub fn completed(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            progress: 100,
            complete: true,
            error: None,
        }
    }

    /// Final event of a failed action
    pub fn failed(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            progress: 100,
            complete: false,
            error: Some(error.into()),
        }
    }

    /// Returns true if no further events follow this one
    pub fn is_final(&self) -> bool {
        self.complete || self.error.is_some()
    }
}
