//! Collaborators shared by every sync service of one site

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::ports::{ConfigurationProvider, OutputConsole, PathHelper, ProgressSink};
use crate::domain::value_objects::ProgressEvent;
use crate::error::{SyncError, SyncResult};
use crate::infrastructure::fs::IgnoreFilter;

/// Site identity plus the injected ports
#[derive(Clone)]
pub struct SyncContext {
    pub site_key: String,
    pub workspace_key: String,
    pub paths: Arc<dyn PathHelper>,
    pub config: Arc<dyn ConfigurationProvider>,
    pub console: Arc<dyn OutputConsole>,
    pub progress: Arc<dyn ProgressSink>,
}

impl SyncContext {
    pub fn report(&self, message: &str, progress: u8) {
        self.progress.on_progress(ProgressEvent::step(message, progress));
        self.console.append_line(message);
    }

    pub fn complete(&self, message: &str) {
        self.progress.on_progress(ProgressEvent::completed(message));
        self.console.append_line(message);
    }

    pub fn fail(&self, message: &str, error: &SyncError) {
        self.progress
            .on_progress(ProgressEvent::failed(message, error.to_string()));
        self.console
            .append_line(&format!("{}: {}", message, error));
    }

    /// Output of the last build, or `NoBuildAvailable`
    pub fn build_dir(&self) -> SyncResult<PathBuf> {
        self.paths
            .last_build_dir(&self.site_key, &self.workspace_key)
            .ok_or_else(|| SyncError::NoBuildAvailable {
                site: self.site_key.clone(),
            })
    }

    /// Local working copy of the site
    pub fn source_dir(&self) -> SyncResult<PathBuf> {
        self.config
            .site_source_path(&self.site_key, &self.workspace_key)
    }

    pub fn hugo_version(&self) -> Option<String> {
        self.config.hugo_version(&self.site_key, &self.workspace_key)
    }

    /// Default publish filter plus site patterns
    pub fn ignore_filter(&self) -> SyncResult<IgnoreFilter> {
        IgnoreFilter::publish_default_with(&self.config.extra_ignore_patterns(&self.site_key))
    }
}

/// Emit the closing progress event for an action outcome
pub(crate) fn finish<T>(
    ctx: &SyncContext,
    action: &str,
    result: SyncResult<T>,
) -> SyncResult<T> {
    match &result {
        Ok(_) => {
            tracing::info!(site = %ctx.site_key, %action, "action finished");
            ctx.complete(&format!("{} finished", action));
        }
        Err(SyncError::Cancelled) => {
            tracing::info!(site = %ctx.site_key, %action, "action cancelled");
            ctx.fail(&format!("{} cancelled", action), &SyncError::Cancelled);
        }
        Err(e) => {
            tracing::warn!(site = %ctx.site_key, %action, error = %e, "action failed");
            ctx.fail(&format!("{} failed", action), e);
        }
    }
    result
}
