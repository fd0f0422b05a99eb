//! GitLab CI Configurator
//!
//! Generates `.gitlab-ci.yml` at the repository root. Both jobs run in the
//! Hugo extended image and only on the publish branch.

use std::path::{Path, PathBuf};

use crate::domain::ports::{CiConfigurator, WorkflowOptions};
use crate::error::SyncResult;

/// GitLab CI configurator
pub struct GitlabCiConfigurator;

impl GitlabCiConfigurator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GitlabCiConfigurator {
    fn default() -> Self {
        Self::new()
    }
}

impl CiConfigurator for GitlabCiConfigurator {
    fn name(&self) -> &'static str {
        "GitLab CI"
    }

    fn workflow_path(&self) -> &'static str {
        ".gitlab-ci.yml"
    }

    fn render(&self, options: &WorkflowOptions) -> String {
        let rule = format!("$CI_COMMIT_BRANCH == \"{}\"", options.branch);
        format!(
            r#"image: registry.gitlab.com/pages/hugo/hugo_extended:{version}

variables:
  GIT_SUBMODULE_STRATEGY: recursive

stages:
  - build
  - deploy

build:
  stage: build
  script:
    - {command}
  artifacts:
    paths:
      - public
  rules:
    - if: {rule}

pages:
  stage: deploy
  script:
    - echo "Publishing public/ to GitLab Pages"
  artifacts:
    paths:
      - public
  rules:
    - if: {rule}
"#,
            version = options.hugo_version(),
            command = options.hugo_command(),
            rule = rule,
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
