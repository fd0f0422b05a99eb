//! Error types for sitesync
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for sitesync operations
pub type SyncResult<T> = Result<T, SyncError>;

/// Main error type for publish and sync operations
#[derive(Error, Debug)]
pub enum SyncError {
    /// A required publish config field is missing or empty
    #[error("sync target is not configured: missing '{field}'")]
    SyncNotConfigured { field: &'static str },

    /// The factory has no backend for this config type
    #[error("unsupported sync type '{kind}'")]
    UnsupportedSyncType { kind: String },

    /// The service exists but does not implement the action
    #[error("{service}: action '{action}' Not yet implemented")]
    ActionNotImplemented {
        service: &'static str,
        action: String,
    },

    /// The embedded git binary exited with a non-zero status
    #[error("`{command}` failed (exit code {code:?}): {stderr}")]
    ExternalProcessFailure {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// Publish requested before the build pipeline produced output
    #[error("no build available for site '{site}' - build the site before publishing")]
    NoBuildAvailable { site: String },

    /// The embedded git binary could not be located
    #[error("embedded git binary not found: {0}")]
    GitBinaryNotFound(String),

    /// A subprocess exceeded its time budget and was killed
    #[error("`{command}` timed out after {}s", .after.as_secs())]
    Timeout { command: String, after: Duration },

    /// The operation was cancelled through its token
    #[error("operation cancelled")]
    Cancelled,

    /// Publish config present but malformed
    #[error("invalid sync config: {0}")]
    InvalidConfig(String),

    /// Action parameters missing or malformed
    #[error("invalid parameters for '{action}': {message}")]
    InvalidParameters { action: String, message: String },

    /// Site configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    ConfigFile { file: PathBuf, message: String },

    /// Ignore pattern could not be compiled
    #[error("invalid ignore pattern '{pattern}': {message}")]
    IgnorePattern { pattern: String, message: String },

    /// Another publish holds the staging lock
    #[error("failed to lock {path}: {message}")]
    LockFailed { path: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error (introspection output, action parameters)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Directory walk error during a tree copy
    #[error("directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

impl SyncError {
    /// Returns true when a retry from scratch may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ExternalProcessFailure { .. } | Self::Timeout { .. } | Self::Io(_)
        )
    }
}
