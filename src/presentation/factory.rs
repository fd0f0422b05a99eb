//! Sync Factory wiring
//!
//! Creates the `SyncFactory` with infrastructure dependencies wired up.
//! This is the dependency injection point for the binary.

use std::sync::Arc;

use crate::application::{GitSettings, SyncDependencies, SyncFactory};
use crate::domain::ports::ProgressSink;
use crate::infrastructure::config::{SiteConfigFile, SiteConfigProvider};
use crate::infrastructure::events::TracingConsole;
use crate::infrastructure::fs::SitePaths;

/// Path helper for a site file: its data root plus the configured build dir
pub fn create_site_paths(config: &SiteConfigFile) -> SitePaths {
    let paths = SitePaths::new(config.data_root());
    match &config.site.build_dir {
        Some(dir) => paths.with_build_dir(&config.site.key, dir.clone()),
        None => paths,
    }
}

/// Create a sync factory for one site configuration file
///
/// Console output goes through `tracing`; progress goes to `progress`.
pub fn create_sync_factory(config: &SiteConfigFile, progress: Arc<dyn ProgressSink>) -> SyncFactory {
    let paths = create_site_paths(config);
    let lock_dir = paths.lock_dir();

    let deps = SyncDependencies::new(
        Arc::new(paths),
        Arc::new(SiteConfigProvider::from_file(config)),
        lock_dir,
    )
    .with_console(Arc::new(TracingConsole))
    .with_progress(progress)
    .with_git(GitSettings {
        binary: config.git.binary.clone(),
        timeout: config.git_timeout(),
    });

    SyncFactory::new(deps)
}
