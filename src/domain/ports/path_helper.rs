//! Path Helper Port
//!
//! Resolves the per-site data directories the engine stages into.
//!
//! Layout under the data root:
//! - `sites/<siteKey>/` - persistent per-site state
//! - `sites/<siteKey>/<provider>SyncRepo` - git staging checkout
//! - `temp/<siteKey>/` - scratch space emptied at the start of each attempt
//! - `temp/keys/` - short-lived deploy key files

use std::path::PathBuf;

pub trait PathHelper: Send + Sync {
    /// Persistent directory of one site
    fn site_root(&self, site_key: &str) -> PathBuf;

    /// Scratch directory of one site
    fn temp_root(&self, site_key: &str) -> PathBuf;

    /// Directory that holds temporary deploy key files
    fn key_material_dir(&self) -> PathBuf;

    /// Output directory of the most recent build, if any
    fn last_build_dir(&self, site_key: &str, workspace_key: &str) -> Option<PathBuf>;

    /// Persistent staging directory, e.g. `sites/<siteKey>/githubSyncRepo`
    fn staging_repo_dir(&self, site_key: &str, dir_name: &str) -> PathBuf {
        self.site_root(site_key).join(dir_name)
    }
}
