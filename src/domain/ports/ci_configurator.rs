//! CI Configurator Port
//!
//! Strategy for rendering one hosting provider's CI workflow. Rendering is
//! pure and deterministic; writing places the text at the provider path
//! inside a repository checkout.

use std::path::{Path, PathBuf};

use crate::error::SyncResult;

/// Hugo version used when the site does not pin one
pub const DEFAULT_HUGO_VERSION: &str = "0.81.0";

/// Inputs of a workflow render
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkflowOptions {
    pub branch: String,
    pub hugo_version: Option<String>,
    pub override_base_url: Option<String>,
}

impl WorkflowOptions {
    pub fn new(branch: impl Into<String>) -> Self {
        Self {
            branch: branch.into(),
            ..Self::default()
        }
    }

    pub fn with_hugo_version(mut self, version: Option<String>) -> Self {
        self.hugo_version = version;
        self
    }

    pub fn with_override_base_url(mut self, url: Option<String>) -> Self {
        self.override_base_url = url;
        self
    }

    /// Pinned Hugo version or the default
    pub fn hugo_version(&self) -> &str {
        self.hugo_version
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_HUGO_VERSION)
    }

    /// Hugo build command with `--minify` and an optional `--baseURL`
    pub fn hugo_command(&self) -> String {
        match self
            .override_base_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
        {
            Some(url) => format!("hugo --minify --baseURL {}", url),
            None => "hugo --minify".to_string(),
        }
    }
}

/// Renders and writes a provider-specific CI workflow
pub trait CiConfigurator: Send + Sync {
    /// Provider display name
    fn name(&self) -> &'static str;

    /// Workflow file location relative to the repository root
    fn workflow_path(&self) -> &'static str;

    /// Render the workflow text
    fn render(&self, options: &WorkflowOptions) -> String;

    /// Write the rendered workflow under `destination`, returning the file path
    fn write_workflow(&self, destination: &Path, options: &WorkflowOptions)
        -> SyncResult<PathBuf>;
}
