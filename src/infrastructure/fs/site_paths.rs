//! Data-root path resolution
//!
//! Implements the `PathHelper` port over one data root directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::domain::ports::PathHelper;

/// Environment variable overriding the data root (used by tests)
pub const SITESYNC_HOME_VAR: &str = "SITESYNC_HOME";

/// Resolve the default data root
///
/// `SITESYNC_HOME` wins, then the platform data directory.
pub fn default_data_root() -> PathBuf {
    std::env::var_os(SITESYNC_HOME_VAR)
        .map(PathBuf::from)
        .or_else(|| dirs::data_dir().map(|d| d.join("sitesync")))
        .unwrap_or_else(|| PathBuf::from(".sitesync"))
}

/// Paths under a single data root
#[derive(Debug, Clone)]
pub struct SitePaths {
    data_root: PathBuf,
    build_dirs: HashMap<String, PathBuf>,
}

impl SitePaths {
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
            build_dirs: HashMap::new(),
        }
    }

    /// Register the build output directory of a site
    pub fn with_build_dir(mut self, site_key: &str, dir: impl Into<PathBuf>) -> Self {
        self.build_dirs.insert(site_key.to_string(), dir.into());
        self
    }

    pub fn data_root(&self) -> &Path {
        &self.data_root
    }

    /// Directory holding cross-process staging locks
    pub fn lock_dir(&self) -> PathBuf {
        self.data_root.join("locks")
    }

    /// Conventional build location: `sites/<site>/builds/<workspace>`
    pub fn conventional_build_dir(&self, site_key: &str, workspace_key: &str) -> PathBuf {
        self.site_root(site_key).join("builds").join(workspace_key)
    }
}

impl PathHelper for SitePaths {
    fn site_root(&self, site_key: &str) -> PathBuf {
        self.data_root.join("sites").join(site_key)
    }

    fn temp_root(&self, site_key: &str) -> PathBuf {
        self.data_root.join("temp").join(site_key)
    }

    fn key_material_dir(&self) -> PathBuf {
        self.data_root.join("temp").join("keys")
    }

    fn last_build_dir(&self, site_key: &str, workspace_key: &str) -> Option<PathBuf> {
        let dir = self
            .build_dirs
            .get(site_key)
            .cloned()
            .unwrap_or_else(|| self.conventional_build_dir(site_key, workspace_key));
        dir.is_dir().then_some(dir)
    }
}
