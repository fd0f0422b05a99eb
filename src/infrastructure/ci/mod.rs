//! CI Workflow Configurators
//!
//! These implement the CiConfigurator port, one per hosting provider.
//! Generic git servers and unrecognized providers get no CI.

pub mod forgejo_actions;
pub mod github_actions;
pub mod gitlab_ci;

pub use forgejo_actions::ForgejoActionsConfigurator;
pub use github_actions::GithubActionsConfigurator;
pub use gitlab_ci::GitlabCiConfigurator;

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::ports::CiConfigurator;
use crate::domain::value_objects::GitProvider;
use crate::error::SyncResult;

/// Get the configurator for a provider, `None` means "skip CI generation"
pub fn get_ci_configurator(provider: GitProvider) -> Option<Box<dyn CiConfigurator>> {
    match provider {
        GitProvider::Github => Some(Box::new(GithubActionsConfigurator::new())),
        GitProvider::Gitlab => Some(Box::new(GitlabCiConfigurator::new())),
        GitProvider::Forgejo => Some(Box::new(ForgejoActionsConfigurator::new())),
        GitProvider::Generic | GitProvider::Unknown => None,
    }
}

/// Get all available configurators
pub fn all_ci_configurators() -> Vec<Box<dyn CiConfigurator>> {
    vec![
        Box::new(GithubActionsConfigurator::new()),
        Box::new(GitlabCiConfigurator::new()),
        Box::new(ForgejoActionsConfigurator::new()),
    ]
}

#[cfg(unix)]
const WORKFLOW_MODE: u32 = 0o644;

/// Atomically write `content` to `destination/relative`, creating parents
pub(crate) fn write_rendered(
    destination: &Path,
    relative: &str,
    content: &str,
) -> SyncResult<PathBuf> {
    let path = destination.join(relative);
    let parent = path.parent().unwrap_or(destination);
    std::fs::create_dir_all(parent)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    #[cfg(unix)]
    {
        // Temp files are created 0600; workflows are ordinary repo files
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(tmp.path(), std::fs::Permissions::from_mode(WORKFLOW_MODE))?;
    }
    tmp.persist(&path).map_err(|e| e.error)?;

    tracing::debug!(path = %path.display(), "wrote CI workflow");
    Ok(path)
}
