//! Forgejo Actions Configurator
//!
//! Generates `.forgejo/workflows/hugo-build.yml`. Same syntax as GitHub
//! Actions, but the job runs inside the `klakegg/hugo` extended image and
//! uploads the site as a `pages` artifact.

use std::path::{Path, PathBuf};

use crate::domain::ports::{CiConfigurator, WorkflowOptions};
use crate::error::SyncResult;

/// Forgejo / Gitea Actions configurator
pub struct ForgejoActionsConfigurator;

impl ForgejoActionsConfigurator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ForgejoActionsConfigurator {
    fn default() -> Self {
        Self::new()
    }
}

impl CiConfigurator for ForgejoActionsConfigurator {
    fn name(&self) -> &'static str {
        "Forgejo Actions"
    }

    fn workflow_path(&self) -> &'static str {
        ".forgejo/workflows/hugo-build.yml"
    }

    fn render(&self, options: &WorkflowOptions) -> String {
        format!(
            r#"name: Hugo build

on:
  push:
    branches:
      - {branch}

jobs:
  build:
    runs-on: docker
    container:
      image: klakegg/hugo:{version}-ext-alpine
    steps:
      - uses: actions/checkout@v3
        with:
          submodules: true
          fetch-depth: 0

      - name: Build
        run: {command}

      - name: Upload pages artifact
        uses: actions/upload-artifact@v3
        with:
          name: pages
          path: ./public
"#,
            branch = options.branch,
            version = options.hugo_version(),
            command = options.hugo_command(),
        )
    }

    fn write_workflow(
        &self,
        destination: &Path,
        options: &WorkflowOptions,
    ) -> SyncResult<PathBuf> {
        super::write_rendered(destination, self.workflow_path(), &self.render(options))
    }
}
