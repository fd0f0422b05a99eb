//! Sync Factory
//!
//! Resolves a publish config to its backend and injects the shared
//! collaborators identically into every variant.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use super::serialized::SerializedSyncService;
use crate::domain::entities::{PublishConfig, SyncConfig};
use crate::domain::ports::{
    ConfigurationProvider, NoopConsole, NoopProgressSink, OutputConsole, PathHelper, ProgressSink,
    SyncService,
};
use crate::error::{SyncError, SyncResult};
use crate::infrastructure::git::{EmbeddedGit, DEFAULT_GIT_TIMEOUT};
use crate::infrastructure::sync::{FolderSync, GitSync, LegacySync, SyncContext};

/// How to locate and bound the embedded git binary
#[derive(Debug, Clone)]
pub struct GitSettings {
    /// Explicit binary; `None` falls back to the environment and `PATH`
    pub binary: Option<PathBuf>,
    pub timeout: Duration,
}

impl Default for GitSettings {
    fn default() -> Self {
        Self {
            binary: None,
            timeout: DEFAULT_GIT_TIMEOUT,
        }
    }
}

/// Collaborators handed to every sync service
#[derive(Clone)]
pub struct SyncDependencies {
    pub paths: Arc<dyn PathHelper>,
    pub config: Arc<dyn ConfigurationProvider>,
    pub console: Arc<dyn OutputConsole>,
    pub progress: Arc<dyn ProgressSink>,
    pub git: GitSettings,
    /// Directory of cross-process staging locks
    pub lock_dir: PathBuf,
}

impl SyncDependencies {
    /// Silent console and progress, default git settings
    pub fn new(
        paths: Arc<dyn PathHelper>,
        config: Arc<dyn ConfigurationProvider>,
        lock_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            paths,
            config,
            console: Arc::new(NoopConsole),
            progress: Arc::new(NoopProgressSink),
            git: GitSettings::default(),
            lock_dir: lock_dir.into(),
        }
    }

    pub fn with_console(mut self, console: Arc<dyn OutputConsole>) -> Self {
        self.console = console;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_git(mut self, git: GitSettings) -> Self {
        self.git = git;
        self
    }
}

type GuardKey = (String, String);

/// Entry point of the engine
pub struct SyncFactory {
    deps: SyncDependencies,
    guards: Mutex<HashMap<GuardKey, Arc<Mutex<()>>>>,
}

impl SyncFactory {
    pub fn new(deps: SyncDependencies) -> Self {
        Self {
            deps,
            guards: Mutex::new(HashMap::new()),
        }
    }

    fn context(&self, site_key: &str, workspace_key: &str) -> SyncContext {
        SyncContext {
            site_key: site_key.to_string(),
            workspace_key: workspace_key.to_string(),
            paths: self.deps.paths.clone(),
            config: self.deps.config.clone(),
            console: self.deps.console.clone(),
            progress: self.deps.progress.clone(),
        }
    }

    /// Backend for `config`, selected strictly by its `type`
    ///
    /// The returned service is not serialized; concurrent publishes of the
    /// same target must go through `get_serialized_publisher`.
    pub fn get_publisher(
        &self,
        config: &SyncConfig,
        site_key: &str,
        workspace_key: &str,
    ) -> SyncResult<Box<dyn SyncService>> {
        let ctx = self.context(site_key, workspace_key);
        let service: Box<dyn SyncService> = match config {
            SyncConfig::Folder(folder) => Box::new(FolderSync::new(folder.clone(), ctx)),
            SyncConfig::Git(git) => {
                let binary = EmbeddedGit::resolve(self.deps.git.binary.as_deref(), self.deps.git.timeout)?;
                Box::new(GitSync::new(git.clone(), ctx, binary))
            }
            SyncConfig::Github(_) => Box::new(LegacySync::github()),
            SyncConfig::Sysgit(_) => Box::new(LegacySync::sysgit()),
            SyncConfig::Unsupported { kind } => {
                return Err(SyncError::UnsupportedSyncType { kind: kind.clone() })
            }
        };
        tracing::debug!(site = site_key, kind = config.kind(), "resolved publisher");
        Ok(service)
    }

    /// Backend whose actions never overlap with another publish touching
    /// the same staging state
    ///
    /// Serialization holds within this factory and, through a lock file,
    /// across processes sharing the data root. Its unit is the
    /// `staging_scope` of the target, which always covers the
    /// `(site, publish key)` pair.
    pub fn get_serialized_publisher(
        &self,
        publish: &PublishConfig,
        site_key: &str,
        workspace_key: &str,
    ) -> SyncResult<Box<dyn SyncService>> {
        let inner = self.get_publisher(&publish.config, site_key, workspace_key)?;
        let scope = staging_scope(publish);
        Ok(Box::new(SerializedSyncService::new(
            inner,
            self.guard_for(site_key, &scope),
            self.deps.lock_dir.clone(),
            site_key,
            &scope,
        )))
    }

    fn guard_for(&self, site_key: &str, scope: &str) -> Arc<Mutex<()>> {
        let mut guards = self.guards.lock().unwrap_or_else(PoisonError::into_inner);
        guards
            .entry((site_key.to_string(), scope.to_string()))
            .or_default()
            .clone()
    }
}

/// Staging state a target shares with other targets of the same site
///
/// Git targets all clone through `temp/<site>`; folder targets all pull
/// through `sites/<site>/folderSyncRepo`. Other targets stage nothing.
pub fn staging_scope(publish: &PublishConfig) -> String {
    match &publish.config {
        SyncConfig::Git(_) | SyncConfig::Folder(_) => publish.config.kind().to_string(),
        _ => format!("target:{}", publish.key),
    }
}
