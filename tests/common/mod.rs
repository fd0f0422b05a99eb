//! Common test utilities for sitesync scenario and CLI tests.
//!
//! This module provides:
//! - `SiteFixture`: a temp site with source, build output and data root
//! - `fake_git`: a shell stand-in for the embedded git binary (unix)
//! - `run_cli`: run the `sitesync` binary with an isolated data root

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::Arc;

use sitesync::application::{GitSettings, SyncDependencies, SyncFactory};
use sitesync::domain::ports::{NoopConsole, OutputConsole};
use sitesync::infrastructure::config::SiteConfigProvider;
use sitesync::infrastructure::events::RecordingProgressSink;
use sitesync::infrastructure::fs::{SitePaths, SITESYNC_HOME_VAR};
use tempfile::TempDir;

pub const SITE_KEY: &str = "blog";
pub const WORKSPACE_KEY: &str = "main";

/// Isolated site: `src/`, `build/`, `data/` and an `out/` target under one temp dir
pub struct SiteFixture {
    pub root: TempDir,
}

impl SiteFixture {
    pub fn new() -> Self {
        let fixture = Self {
            root: tempfile::tempdir().unwrap(),
        };
        write_files(
            &fixture.source_dir(),
            &[
                ("config.toml", "title = 'Blog'\n"),
                ("content/post.md", "# Post\n"),
            ],
        );
        write_files(
            &fixture.build_dir(),
            &[
                ("config.toml", "title = 'Blog'\n"),
                ("content/post.md", "# Post\n"),
                ("public/index.html", "<h1>Blog</h1>"),
                ("public/css/site.css", "body{}"),
                ("public/.hugo_build.lock", ""),
                (".hugo_build.lock", ""),
                (".quiqr-cache/thumb.png", "png"),
            ],
        );
        fixture
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn source_dir(&self) -> PathBuf {
        self.path("src")
    }

    pub fn build_dir(&self) -> PathBuf {
        self.path("build")
    }

    pub fn data_dir(&self) -> PathBuf {
        self.path("data")
    }

    pub fn out_dir(&self) -> PathBuf {
        self.path("out")
    }

    pub fn paths(&self) -> SitePaths {
        SitePaths::new(self.data_dir()).with_build_dir(SITE_KEY, self.build_dir())
    }

    /// Factory wired to this site, recording progress
    pub fn factory(&self, git: GitSettings) -> (SyncFactory, Arc<RecordingProgressSink>) {
        self.factory_with_console(git, Arc::new(NoopConsole))
    }

    pub fn factory_with_console(
        &self,
        git: GitSettings,
        console: Arc<dyn OutputConsole>,
    ) -> (SyncFactory, Arc<RecordingProgressSink>) {
        let paths = self.paths();
        let lock_dir = paths.lock_dir();
        let progress = Arc::new(RecordingProgressSink::new());
        let deps = SyncDependencies::new(
            Arc::new(paths),
            Arc::new(SiteConfigProvider::new(SITE_KEY, self.source_dir())),
            lock_dir,
        )
        .with_console(console)
        .with_progress(progress.clone())
        .with_git(git);
        (SyncFactory::new(deps), progress)
    }

    /// Write `sitesync.toml` with the given `[[publish]]` tables appended
    pub fn write_config(&self, publish: &str) -> PathBuf {
        let content = format!(
            "[site]\nkey = '{key}'\nsource = '{src}'\nbuild_dir = '{build}'\ndata_dir = '{data}'\n\n{publish}",
            key = SITE_KEY,
            src = self.source_dir().display(),
            build = self.build_dir().display(),
            data = self.data_dir().display(),
            publish = publish,
        );
        let path = self.path("sitesync.toml");
        fs::write(&path, content).unwrap();
        path
    }
}

pub fn write_files(dir: &Path, files: &[(&str, &str)]) {
    for (relative, content) in files {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

/// Sorted relative file paths under `dir`
pub fn list_files(dir: &Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(dir)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    files.sort();
    files
}

pub fn dir_is_empty(dir: &Path) -> bool {
    fs::read_dir(dir).map(|mut d| d.next().is_none()).unwrap_or(true)
}

/// Shell script standing in for the embedded git binary
///
/// Every invocation appends its arguments to `git.log` next to the script.
/// `clone` creates `<dest>/.git`; `log_remote`/`log_local` print a JSON
/// log; `push` fails with "remote rejected" when `fail_push` is set.
#[cfg(unix)]
pub fn fake_git(dir: &Path, fail_push: bool) -> PathBuf {
    write_fake_git(dir, fail_push, 0)
}

/// `fake_git` whose `clone` takes `clone_secs` seconds
#[cfg(unix)]
pub fn slow_fake_git(dir: &Path, clone_secs: u32) -> PathBuf {
    write_fake_git(dir, false, clone_secs)
}

#[cfg(unix)]
fn write_fake_git(dir: &Path, fail_push: bool, clone_secs: u32) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    fs::create_dir_all(dir).unwrap();
    let log = dir.join("git.log");
    let push = if fail_push {
        "echo 'remote rejected' >&2; exit 1"
    } else {
        ":"
    };
    let script = format!(
        r#"#!/bin/sh
echo "$*" >> '{log}'
cmd="$1"
shift
case "$cmd" in
  clone)
    for arg; do dest="$arg"; done
    sleep {clone_secs}
    mkdir -p "$dest/.git"
    echo 'ref: refs/heads/main' > "$dest/.git/HEAD"
    echo 'remote readme' > "$dest/README.md"
    ;;
  log_remote|log_local)
    echo '[{{"hash":"abc123","message":"initial"}}]'
    ;;
  push)
    {push}
    ;;
esac
exit 0
"#,
        log = log.display(),
        push = push,
        clone_secs = clone_secs,
    );

    let path = dir.join("embgit");
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Logged invocations of a `fake_git` script in `dir`
pub fn git_calls(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("git.log"))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

pub fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_sitesync")
}

/// Run the CLI from `cwd` with the data root pinned inside it
pub fn run_cli(cwd: &Path, args: &[&str]) -> Output {
    Command::new(bin())
        .current_dir(cwd)
        .env(SITESYNC_HOME_VAR, cwd.join("data"))
        .env_remove("SITESYNC_LOG")
        .args(args)
        .output()
        .unwrap()
}
