//! Configuration Provider Port
//!
//! Site metadata owned by the configuration layer.

use std::path::PathBuf;

use crate::error::SyncResult;

pub trait ConfigurationProvider: Send + Sync {
    /// Source tree of a site workspace (the local working copy)
    fn site_source_path(&self, site_key: &str, workspace_key: &str) -> SyncResult<PathBuf>;

    /// Hugo version the site is built with, if known
    fn hugo_version(&self, site_key: &str, workspace_key: &str) -> Option<String>;

    /// Site-specific gitignore-style patterns added to the publish filter
    fn extra_ignore_patterns(&self, _site_key: &str) -> Vec<String> {
        Vec::new()
    }
}
