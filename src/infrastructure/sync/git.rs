//! Universal Git Sync Service
//!
//! One backend for every hosting provider; provider differences are the
//! remote URL, the staging directory name and the CI configurator.
//!
//! Actions:
//! - `hardPush`: full-clone publish, works without any cached state
//! - `pushWithSoftMerge`: reuse the cached checkout, falls back to `hardPush`
//! - `pullFromRemote`: hard reset of the remote branch onto the site source
//! - `readRemote`: remote commit log (JSON from the embedded binary)
//! - `refreshRemote`: update the cached checkout, return its local log
//! - `checkoutRef`: put one ref's tree onto the site source
//! - `checkoutLatest`: put the branch head's tree onto the site source
//!
//! Pull and checkout overwrite files in the site source tree: uncommitted
//! local edits to those files are lost.

use serde_json::{json, Value};

use super::context::{finish, SyncContext};
use super::publish_tree::check_publishable;
use super::staging_helper::GitStagingHelper;
use super::PULL_STATUS;
use crate::domain::entities::GitConfig;
use crate::domain::ports::SyncService;
use crate::domain::value_objects::{CancelToken, GitAction};
use crate::error::{SyncError, SyncResult};
use crate::infrastructure::git::EmbeddedGit;

/// Git-backed publish target
pub struct GitSync {
    helper: GitStagingHelper,
}

impl GitSync {
    pub fn new(config: GitConfig, ctx: SyncContext, git: EmbeddedGit) -> Self {
        Self {
            helper: GitStagingHelper::new(ctx, config, git),
        }
    }

    fn ctx(&self) -> &SyncContext {
        self.helper.ctx()
    }

    /// Full-clone publish
    pub fn hard_push(&self, cancel: &CancelToken) -> SyncResult<Value> {
        let helper = &self.helper;
        helper.config().validate()?;
        let build_dir = self.ctx().build_dir()?;
        check_publishable(&self.ctx().site_key, &build_dir, helper.config().publish_scope)?;
        let filter = self.ctx().ignore_filter()?;

        self.ctx().report("Preparing temporary clone", 5);
        let clone_dir = helper.prepare_temp_clone_dir()?;
        let key = helper.write_deploy_key()?;
        let identity = helper.identity(&key);
        helper.reset_staging_dir()?;

        self.ctx().report("Cloning remote repository", 20);
        helper.clone_remote(&clone_dir, &identity, cancel)?;
        helper.checkout_branch(&clone_dir, cancel)?;

        self.ctx().report("Copying git history", 30);
        helper.copy_git_history(&clone_dir, cancel)?;
        helper.discard_temp_clone(&clone_dir);

        self.ctx().report("Copying site files", 40);
        helper.copy_site_tree(&build_dir, &filter, cancel)?;
        helper.finish_tree()?;

        self.ctx().report("Committing and pushing", 70);
        helper.publish_step3_add_commit_push(&identity, cancel)?;
        Ok(Value::Bool(true))
    }

    /// Incremental publish on top of the cached checkout
    pub fn push_with_soft_merge(&self, cancel: &CancelToken) -> SyncResult<Value> {
        let helper = &self.helper;
        helper.config().validate()?;
        if !helper.has_history() {
            tracing::info!(site = %self.ctx().site_key, "no cached checkout, using full clone");
            return self.hard_push(cancel);
        }
        let build_dir = self.ctx().build_dir()?;
        check_publishable(&self.ctx().site_key, &build_dir, helper.config().publish_scope)?;
        let filter = self.ctx().ignore_filter()?;
        let key = helper.write_deploy_key()?;
        let identity = helper.identity(&key);

        self.ctx().report("Updating cached checkout", 20);
        helper.refresh_staging(&identity, cancel)?;

        self.ctx().report("Copying site files", 40);
        helper.clear_worktree()?;
        helper.copy_site_tree(&build_dir, &filter, cancel)?;
        helper.finish_tree()?;

        self.ctx().report("Committing and pushing", 70);
        helper.publish_step3_add_commit_push(&identity, cancel)?;
        Ok(Value::Bool(true))
    }

    /// Hard reset of the remote branch onto the site source
    pub fn pull_from_remote(&self, cancel: &CancelToken) -> SyncResult<Value> {
        let helper = &self.helper;
        helper.config().validate()?;
        let source = self.ctx().source_dir()?;
        let filter = self.ctx().ignore_filter()?;
        let key = helper.write_deploy_key()?;
        let identity = helper.identity(&key);

        self.ctx().report("Fetching remote", 20);
        helper.refresh_staging(&identity, cancel)?;

        self.ctx().report("Updating site source", 60);
        helper.sync_staging_to_source(&source, &filter, cancel)?;
        Ok(Value::String(PULL_STATUS.to_string()))
    }

    pub fn read_remote(&self, cancel: &CancelToken) -> SyncResult<Value> {
        let helper = &self.helper;
        helper.config().validate()?;
        let key = helper.write_deploy_key()?;

        self.ctx().report("Reading remote history", 30);
        helper.git().log_remote(&helper.remote_url(), key.path(), cancel)
    }

    pub fn refresh_remote(&self, cancel: &CancelToken) -> SyncResult<Value> {
        let helper = &self.helper;
        helper.config().validate()?;
        let key = helper.write_deploy_key()?;
        let identity = helper.identity(&key);

        self.ctx().report("Refreshing cached checkout", 30);
        helper.refresh_staging(&identity, cancel)?;
        helper.git().log_local(&helper.staging_dir(), cancel)
    }

    /// Check out `reference` in the cached checkout and copy it onto the source
    pub fn checkout_ref(&self, reference: &str, cancel: &CancelToken) -> SyncResult<Value> {
        let helper = &self.helper;
        helper.config().validate()?;
        let source = self.ctx().source_dir()?;
        let filter = self.ctx().ignore_filter()?;

        if !helper.has_history() {
            let key = helper.write_deploy_key()?;
            let identity = helper.identity(&key);
            self.ctx().report("Cloning remote repository", 20);
            helper.refresh_staging(&identity, cancel)?;
        }

        self.ctx().report(&format!("Checking out {}", reference), 50);
        let staging = helper.staging_dir();
        helper.git().reset_hard(&staging, cancel)?;
        helper.git().checkout(&staging, reference, cancel)?;

        self.ctx().report("Updating site source", 70);
        helper.sync_staging_to_source(&source, &filter, cancel)?;
        Ok(json!({ "ref": reference }))
    }

    /// Check out the configured branch head and copy it onto the source
    pub fn checkout_latest(&self, cancel: &CancelToken) -> SyncResult<Value> {
        let helper = &self.helper;
        helper.config().validate()?;
        let source = self.ctx().source_dir()?;
        let filter = self.ctx().ignore_filter()?;
        let key = helper.write_deploy_key()?;
        let identity = helper.identity(&key);

        self.ctx().report("Fetching remote", 20);
        helper.refresh_staging(&identity, cancel)?;

        self.ctx().report("Updating site source", 60);
        helper.sync_staging_to_source(&source, &filter, cancel)?;
        Ok(json!({ "ref": helper.config().branch }))
    }
}

fn ref_parameter<'a>(parameters: Option<&'a Value>) -> SyncResult<&'a str> {
    parameters
        .and_then(|p| p.get("ref"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or_else(|| SyncError::InvalidParameters {
            action: GitAction::CheckoutRef.as_str().to_string(),
            message: "expected {\"ref\": \"<commit or branch>\"}".to_string(),
        })
}

impl SyncService for GitSync {
    fn service_type(&self) -> &'static str {
        "git"
    }

    fn dispatch(
        &self,
        action: &str,
        parameters: Option<&Value>,
        cancel: &CancelToken,
    ) -> SyncResult<Value> {
        let Some(parsed) = GitAction::parse(action) else {
            return Err(SyncError::ActionNotImplemented {
                service: self.service_type(),
                action: action.to_string(),
            });
        };
        tracing::info!(
            site = %self.ctx().site_key,
            provider = self.helper.config().git_provider.as_str(),
            %action,
            push = parsed.is_push(),
            "git action started"
        );

        let result = match parsed {
            GitAction::HardPush => self.hard_push(cancel),
            GitAction::PushWithSoftMerge => self.push_with_soft_merge(cancel),
            GitAction::PullFromRemote => self.pull_from_remote(cancel),
            GitAction::ReadRemote => self.read_remote(cancel),
            GitAction::RefreshRemote => self.refresh_remote(cancel),
            GitAction::CheckoutRef => {
                ref_parameter(parameters).and_then(|r| self.checkout_ref(r, cancel))
            }
            GitAction::CheckoutLatest => self.checkout_latest(cancel),
        };
        finish(self.ctx(), action, result)
    }
}
