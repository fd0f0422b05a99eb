//! Git staging steps
//!
//! The numbered steps of a git publish, exposed as standalone functions so
//! each backend composes exactly the sequence it needs. The order used by a
//! full-clone publish is a hard invariant: history must be in the staging
//! directory before the site files, or the commit has nothing to build on.
//!
//! 1. empty the temp root, create the clone directory
//! 2. write the deploy key
//! 3. empty the persistent staging directory
//! 4. clone the remote into the temp clone directory, switch to the branch
//! 5. copy only `.git` from the clone into staging
//! 6. copy the site tree into staging through the ignore filter
//! 7. CI workflow, CNAME, `static/`
//! 8. add, commit, push

use chrono::Utc;
use std::path::{Path, PathBuf};

use super::context::SyncContext;
use super::publish_tree::{stage_publish_tree, STATIC_DIR};
use crate::domain::entities::GitConfig;
use crate::domain::ports::WorkflowOptions;
use crate::domain::services::build_git_url;
use crate::domain::value_objects::{CancelToken, GitIdentity};
use crate::error::SyncResult;
use crate::infrastructure::ci::get_ci_configurator;
use crate::infrastructure::fs::{
    copy_tree, ensure_dir, ensure_sync_dir_empty, remove_path, CopyStats, IgnoreFilter,
    TemporaryPrivateKey,
};
use crate::infrastructure::git::EmbeddedGit;

/// Subdirectory of the temp root receiving the throwaway clone
pub const TEMP_CLONE_DIR: &str = "clone";

const GIT_DIR: &str = ".git";
const CNAME_FILE: &str = "CNAME";

/// Staging steps bound to one site and one git target
pub struct GitStagingHelper {
    ctx: SyncContext,
    config: GitConfig,
    git: EmbeddedGit,
}

impl GitStagingHelper {
    pub fn new(ctx: SyncContext, config: GitConfig, git: EmbeddedGit) -> Self {
        Self { ctx, config, git }
    }

    pub fn ctx(&self) -> &SyncContext {
        &self.ctx
    }

    pub fn config(&self) -> &GitConfig {
        &self.config
    }

    pub fn git(&self) -> &EmbeddedGit {
        &self.git
    }

    pub fn remote_url(&self) -> String {
        build_git_url(
            &self.config.git_base_url,
            &self.config.username,
            &self.config.repository,
            self.config.git_protocol,
            self.config.ssh_port(),
        )
    }

    /// Persistent checkout: `sites/<site>/<provider>SyncRepo`
    pub fn staging_dir(&self) -> PathBuf {
        self.ctx.paths.staging_repo_dir(
            &self.ctx.site_key,
            &self.config.git_provider.staging_dir_name(),
        )
    }

    /// True when the staging directory already tracks history
    pub fn has_history(&self) -> bool {
        self.staging_dir().join(GIT_DIR).is_dir()
    }

    /// Step 1
    pub fn prepare_temp_clone_dir(&self) -> SyncResult<PathBuf> {
        let temp_root = self.ctx.paths.temp_root(&self.ctx.site_key);
        ensure_sync_dir_empty(&temp_root)?;
        let clone_dir = temp_root.join(TEMP_CLONE_DIR);
        ensure_dir(&clone_dir)?;
        Ok(clone_dir)
    }

    /// Step 2; the key file is deleted when the returned guard drops
    pub fn write_deploy_key(&self) -> SyncResult<TemporaryPrivateKey> {
        TemporaryPrivateKey::write(
            &self.ctx.paths.key_material_dir(),
            &self.config.deploy_private_key,
        )
    }

    /// Commit author plus key for this target
    pub fn identity(&self, key: &TemporaryPrivateKey) -> GitIdentity {
        GitIdentity::new(&self.config.email, &self.config.username, key.path())
    }

    /// Step 3
    pub fn reset_staging_dir(&self) -> SyncResult<PathBuf> {
        let staging = self.staging_dir();
        ensure_sync_dir_empty(&staging)?;
        Ok(staging)
    }

    /// Step 4
    pub fn clone_remote(
        &self,
        dest: &Path,
        identity: &GitIdentity,
        cancel: &CancelToken,
    ) -> SyncResult<()> {
        tracing::debug!(dest = %dest.display(), "cloning remote");
        self.git.clone_repo(
            &self.remote_url(),
            dest,
            Some(identity.private_key_path()),
            cancel,
        )
    }

    /// Put `dir` on the configured branch
    pub fn checkout_branch(&self, dir: &Path, cancel: &CancelToken) -> SyncResult<()> {
        self.git.checkout(dir, &self.config.branch, cancel)
    }

    /// Step 5
    pub fn copy_git_history(&self, clone_dir: &Path, cancel: &CancelToken) -> SyncResult<()> {
        let src = clone_dir.join(GIT_DIR);
        let dest = self.staging_dir().join(GIT_DIR);
        copy_tree(&src, &dest, &IgnoreFilter::none(), cancel)?;
        Ok(())
    }

    /// Step 6
    pub fn copy_site_tree(
        &self,
        build_dir: &Path,
        filter: &IgnoreFilter,
        cancel: &CancelToken,
    ) -> SyncResult<CopyStats> {
        stage_publish_tree(
            &self.ctx.site_key,
            build_dir,
            &self.staging_dir(),
            self.config.publish_scope,
            filter,
            cancel,
        )
    }

    /// Step 7: CI workflow (source scope only), CNAME, `static/`
    pub fn finish_tree(&self) -> SyncResult<()> {
        let staging = self.staging_dir();
        if let Some(path) = self.write_ci_workflow(&staging)? {
            self.ctx
                .console
                .append_line(&format!("Wrote CI workflow {}", path.display()));
        }
        self.write_cname(&staging)?;
        ensure_dir(&staging.join(STATIC_DIR))?;
        Ok(())
    }

    /// Render the provider workflow into `dest` when requested
    pub fn write_ci_workflow(&self, dest: &Path) -> SyncResult<Option<PathBuf>> {
        if !self.config.wants_ci_workflow() {
            return Ok(None);
        }
        let Some(configurator) = get_ci_configurator(self.config.git_provider) else {
            tracing::debug!(provider = %self.config.git_provider, "no CI configurator, skipping");
            return Ok(None);
        };
        let options = WorkflowOptions::new(self.config.branch.clone())
            .with_hugo_version(self.ctx.hugo_version())
            .with_override_base_url(self.config.override_base_url().map(str::to_string));
        configurator.write_workflow(dest, &options).map(Some)
    }

    /// `CNAME` lands where the served site picks it up: the tree root for
    /// build output, `static/` when the remote builds the site itself
    pub fn write_cname(&self, dest: &Path) -> SyncResult<Option<PathBuf>> {
        let Some(cname) = self.config.cname() else {
            return Ok(None);
        };
        let dir = if self.config.publish_scope.is_build_only() {
            dest.to_path_buf()
        } else {
            dest.join(STATIC_DIR)
        };
        ensure_dir(&dir)?;
        let path = dir.join(CNAME_FILE);
        std::fs::write(&path, format!("{}\n", cname))?;
        Ok(Some(path))
    }

    /// Step 8: stage everything, commit, push
    pub fn publish_step3_add_commit_push(
        &self,
        identity: &GitIdentity,
        cancel: &CancelToken,
    ) -> SyncResult<()> {
        let staging = self.staging_dir();
        self.git.add_all(&staging, cancel)?;
        self.git
            .commit(&staging, identity, &commit_message(), cancel)?;
        self.git
            .push(&staging, identity.private_key_path(), cancel)
    }

    /// Bring the staging checkout to the remote branch head
    ///
    /// A cached checkout is hard-reset, switched to the branch and pulled;
    /// without one the remote is cloned fresh.
    pub fn refresh_staging(&self, identity: &GitIdentity, cancel: &CancelToken) -> SyncResult<()> {
        let staging = self.staging_dir();
        if self.has_history() {
            self.git.reset_hard(&staging, cancel)?;
            self.checkout_branch(&staging, cancel)?;
            self.git
                .pull(&staging, identity.private_key_path(), cancel)
        } else {
            ensure_sync_dir_empty(&staging)?;
            self.clone_remote(&staging, identity, cancel)
        }
    }

    /// Remove every working tree entry of the staging checkout except `.git`
    pub fn clear_worktree(&self) -> SyncResult<()> {
        let staging = self.staging_dir();
        for entry in std::fs::read_dir(&staging)? {
            let path = entry?.path();
            if path.file_name().is_some_and(|n| n == GIT_DIR) {
                continue;
            }
            remove_path(&path)?;
        }
        Ok(())
    }

    /// Copy the staging checkout onto `source`, skipping `.git` and tooling
    pub fn sync_staging_to_source(
        &self,
        source: &Path,
        filter: &IgnoreFilter,
        cancel: &CancelToken,
    ) -> SyncResult<CopyStats> {
        copy_tree(&self.staging_dir(), source, filter, cancel)
    }

    /// Best-effort removal of the temp clone
    pub fn discard_temp_clone(&self, clone_dir: &Path) {
        if let Err(e) = remove_path(clone_dir) {
            tracing::warn!(path = %clone_dir.display(), error = %e, "failed to remove temp clone");
        }
    }
}

/// Commit message with a UTC timestamp
pub fn commit_message() -> String {
    format!(
        "Publish from sitesync ({})",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )
}

#[cfg(test)]
mod tests {
    use super::super::context::testing;
    use super::*;
    use crate::domain::value_objects::{GitProvider, PublishScope};
    use crate::infrastructure::git::DEFAULT_GIT_TIMEOUT;
    use std::fs;
    use tempfile::tempdir;

    fn config(scope: PublishScope) -> GitConfig {
        GitConfig {
            git_provider: GitProvider::Gitlab,
            git_base_url: "gitlab.com".into(),
            username: "acme".into(),
            repository: "blog".into(),
            deploy_private_key: "KEY".into(),
            publish_scope: scope,
            ..GitConfig::default()
        }
    }

    fn helper(root: &Path, config: GitConfig) -> GitStagingHelper {
        let (ctx, _) = testing::context(&root.join("data"), &root.join("src"), None);
        GitStagingHelper::new(ctx, config, EmbeddedGit::new("/bin/false", DEFAULT_GIT_TIMEOUT))
    }

    #[test]
    fn staging_dir_is_per_provider() {
        let root = tempdir().unwrap();
        let helper = helper(root.path(), config(PublishScope::Build));
        assert_eq!(
            helper.staging_dir(),
            root.path().join("data/sites/blog/gitlabSyncRepo")
        );
        assert_eq!(helper.remote_url(), "git@gitlab.com:acme/blog.git");
    }

    #[test]
    fn prepare_temp_clone_dir_starts_empty() {
        let root = tempdir().unwrap();
        let helper = helper(root.path(), config(PublishScope::Build));
        let stale = root.path().join("data/temp/blog/clone/old.txt");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, "x").unwrap();

        let clone_dir = helper.prepare_temp_clone_dir().unwrap();

        assert!(clone_dir.is_dir());
        assert!(!stale.exists());
    }

    #[test]
    fn identity_falls_back_to_anonymous_email() {
        let root = tempdir().unwrap();
        let helper = helper(root.path(), config(PublishScope::Build));
        let key = helper.write_deploy_key().unwrap();
        let identity = helper.identity(&key);
        assert_eq!(identity.name(), "acme");
        assert_eq!(identity.email(), "anonymous@sitesync.local");
        assert!(identity
            .private_key_path()
            .starts_with(root.path().join("data/temp/keys")));
    }

    #[test]
    fn ci_workflow_only_for_source_scope_with_switch() {
        let root = tempdir().unwrap();
        let dest = root.path().join("out");

        let mut cfg = config(PublishScope::Build);
        cfg.set_ci_workflow = true;
        assert!(helper(root.path(), cfg).write_ci_workflow(&dest).unwrap().is_none());

        let mut cfg = config(PublishScope::Source);
        cfg.set_ci_workflow = true;
        let path = helper(root.path(), cfg)
            .write_ci_workflow(&dest)
            .unwrap()
            .unwrap();
        assert_eq!(path, dest.join(".gitlab-ci.yml"));
    }

    #[test]
    fn generic_provider_never_writes_ci() {
        let root = tempdir().unwrap();
        let mut cfg = config(PublishScope::Source);
        cfg.set_ci_workflow = true;
        cfg.git_provider = GitProvider::Generic;
        let dest = root.path().join("out");
        assert!(helper(root.path(), cfg).write_ci_workflow(&dest).unwrap().is_none());
    }

    #[test]
    fn cname_location_follows_scope() {
        let root = tempdir().unwrap();
        let dest = root.path().join("out");

        let mut cfg = config(PublishScope::Build);
        cfg.cname_switch = true;
        cfg.cname = "www.acme.test".into();
        let path = helper(root.path(), cfg.clone())
            .write_cname(&dest)
            .unwrap()
            .unwrap();
        assert_eq!(path, dest.join("CNAME"));
        assert_eq!(fs::read_to_string(path).unwrap(), "www.acme.test\n");

        cfg.publish_scope = PublishScope::Source;
        let path = helper(root.path(), cfg).write_cname(&dest).unwrap().unwrap();
        assert_eq!(path, dest.join("static/CNAME"));
    }

    #[test]
    fn cname_requires_switch() {
        let root = tempdir().unwrap();
        let mut cfg = config(PublishScope::Build);
        cfg.cname = "www.acme.test".into();
        assert!(helper(root.path(), cfg)
            .write_cname(root.path())
            .unwrap()
            .is_none());
    }

    #[test]
    fn clear_worktree_keeps_history() {
        let root = tempdir().unwrap();
        let helper = helper(root.path(), config(PublishScope::Build));
        let staging = helper.staging_dir();
        fs::create_dir_all(staging.join(".git")).unwrap();
        fs::create_dir_all(staging.join("posts")).unwrap();
        fs::write(staging.join("index.html"), "x").unwrap();

        helper.clear_worktree().unwrap();

        assert!(helper.has_history());
        assert!(!staging.join("posts").exists());
        assert!(!staging.join("index.html").exists());
    }

    #[test]
    fn commit_message_is_timestamped() {
        let message = commit_message();
        assert!(message.starts_with("Publish from sitesync ("));
        assert!(message.ends_with(" UTC)"));
    }
}
