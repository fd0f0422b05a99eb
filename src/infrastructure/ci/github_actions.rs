//! GitHub Actions Configurator
//!
//! Generates `.github/workflows/hugo-build.yml`:
//! - checkout with submodules and full history
//! - Hugo extended via `peaceiris/actions-hugo`
//! - `./public` deployed via `peaceiris/actions-gh-pages`

use std::path::{Path, PathBuf};

use crate::domain::ports::{CiConfigurator, WorkflowOptions};
use crate::error::SyncResult;

/// GitHub Actions configurator
pub struct GithubActionsConfigurator;

impl GithubActionsConfigurator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GithubActionsConfigurator {
    fn default() -> Self {
        Self::new()
    }
}

impl CiConfigurator for GithubActionsConfigurator {
    fn name(&self) -> &'static str {
        "GitHub Actions"
    }

    fn workflow_path(&self) -> &'static str {
        ".github/workflows/hugo-build.yml"
    }

    fn render(&self, options: &WorkflowOptions) -> String {
        format!(
            r#"name: Hugo build and deploy

on:
  push:
    branches:
      - {branch}
  workflow_dispatch:

jobs:
  deploy:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v3
        with:
          submodules: true
          fetch-depth: 0

      - name: Setup Hugo
        uses: peaceiris/actions-hugo@v2
        with:
          hugo-version: '{version}'
          extended: true

      - name: Build
        run: {command}

      - name: Deploy
        uses: peaceiris/actions-gh-pages@v3
        if: github.ref == 'refs/heads/{branch}'
        with:
          github_token: ${{{{ secrets.GITHUB_TOKEN }}}}
          publish_dir: ./public
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
