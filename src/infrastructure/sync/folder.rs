//! Folder Sync Service
//!
//! Publishes a build to a local folder and pulls a folder back into the
//! site source tree. No git involved.

use serde_json::Value;
use std::path::PathBuf;

use super::context::{finish, SyncContext};
use super::publish_tree::{check_publishable, stage_publish_tree};
use super::PULL_STATUS;
use crate::domain::entities::FolderConfig;
use crate::domain::ports::SyncService;
use crate::domain::value_objects::{CancelToken, FolderAction};
use crate::error::{SyncError, SyncResult};
use crate::infrastructure::fs::{copy_tree, ensure_sync_dir_empty, IgnoreFilter};

/// Staging directory for folder pulls, under the site root
pub const FOLDER_STAGING_DIR: &str = "folderSyncRepo";

/// Sync against a plain local folder
pub struct FolderSync {
    config: FolderConfig,
    ctx: SyncContext,
}

impl FolderSync {
    pub fn new(config: FolderConfig, ctx: SyncContext) -> Self {
        Self { config, ctx }
    }

    fn destination(&self) -> PathBuf {
        PathBuf::from(self.config.path.trim())
    }

    /// Copy the last build into the destination folder
    pub fn publish(&self, cancel: &CancelToken) -> SyncResult<Value> {
        self.config.validate()?;
        let build_dir = self.ctx.build_dir()?;
        check_publishable(&self.ctx.site_key, &build_dir, self.config.publish_scope)?;
        let filter = self.ctx.ignore_filter()?;
        let dest = self.destination();

        self.ctx.report("Preparing destination folder", 10);
        ensure_sync_dir_empty(&dest)?;
        cancel.check()?;

        self.ctx.report("Copying site files", 30);
        let stats = stage_publish_tree(
            &self.ctx.site_key,
            &build_dir,
            &dest,
            self.config.publish_scope,
            &filter,
            cancel,
        )?;
        tracing::debug!(dest = %dest.display(), files = stats.files, "folder publish copied");
        Ok(Value::Bool(true))
    }

    /// Bring the destination folder's contents back onto the site source
    ///
    /// Files in the source tree are overwritten by their counterparts from
    /// the destination. Local-only files are kept.
    pub fn pull_fast_forward_merge(&self, cancel: &CancelToken) -> SyncResult<Value> {
        self.config.validate()?;
        let source = self.ctx.source_dir()?;
        let remote = self.destination();
        if !remote.is_dir() {
            return Err(SyncError::InvalidConfig(format!(
                "publish folder {} does not exist",
                remote.display()
            )));
        }
        let filter = self.ctx.ignore_filter()?;
        let staging = self
            .ctx
            .paths
            .staging_repo_dir(&self.ctx.site_key, FOLDER_STAGING_DIR);

        self.ctx.report("Preparing staging copy", 20);
        ensure_sync_dir_empty(&staging)?;

        self.ctx.report("Reading publish folder", 40);
        copy_tree(&remote, &staging, &filter, cancel)?;

        self.ctx.report("Updating site source", 70);
        copy_tree(&staging, &source, &IgnoreFilter::none(), cancel)?;

        Ok(Value::String(PULL_STATUS.to_string()))
    }
}

impl SyncService for FolderSync {
    fn service_type(&self) -> &'static str {
        "folder"
    }

    fn dispatch(
        &self,
        action: &str,
        _parameters: Option<&Value>,
        cancel: &CancelToken,
    ) -> SyncResult<Value> {
        let Some(parsed) = FolderAction::parse(action) else {
            return Err(SyncError::ActionNotImplemented {
                service: self.service_type(),
                action: action.to_string(),
            });
        };
        tracing::info!(site = %self.ctx.site_key, %action, "folder action started");

        let result = match parsed {
            FolderAction::PushToRemote => self.publish(cancel),
            FolderAction::PullFromRemote => self.pull_fast_forward_merge(cancel),
        };
        finish(&self.ctx, action, result)
    }
}
