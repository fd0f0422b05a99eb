//! File System Implementations
//!
//! Staging, filtered copies, key material and path layout.

mod ignore_filter;
mod key_file;
mod lock;
mod site_paths;
mod staging;

pub use ignore_filter::{IgnoreFilter, DEFAULT_PUBLISH_IGNORES};
pub use key_file::TemporaryPrivateKey;
pub use lock::{lock_file_name, StagingLock};
pub use site_paths::{default_data_root, SitePaths, SITESYNC_HOME_VAR};
pub use staging::{
    copy_tree, empty_dir, ensure_dir, ensure_sync_dir_empty, remove_artifacts_except, remove_path,
    CopyStats,
};
