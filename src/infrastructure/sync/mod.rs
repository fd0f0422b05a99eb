//! Sync Service Implementations
//!
//! Concrete implementations of the SyncService port:
//! - FolderSync: local folder targets
//! - GitSync: git remotes on any provider, composed from GitStagingHelper
//! - LegacySync: placeholders for retired single-provider backends

mod context;
mod folder;
mod git;
mod legacy;
mod publish_tree;
mod staging_helper;

pub use context::SyncContext;
pub use folder::{FolderSync, FOLDER_STAGING_DIR};
pub use git::GitSync;
pub use legacy::LegacySync;
pub use publish_tree::{stage_publish_tree, PUBLIC_DIR, STATIC_DIR};
pub use staging_helper::{commit_message, GitStagingHelper, TEMP_CLONE_DIR};

/// Result of every successful pull
pub const PULL_STATUS: &str = "reset-and-pulled-from-remote";
