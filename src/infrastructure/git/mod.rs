//! Embedded git integration

mod process;

pub use process::{EmbeddedGit, DEFAULT_GIT_BINARY_NAME, DEFAULT_GIT_TIMEOUT, GIT_BIN_ENV};
