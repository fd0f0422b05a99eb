//! Embedded git process wrapper
//!
//! The engine never speaks the git protocol itself. Every repository
//! operation is a positional subcommand of the embedded git binary:
//!
//! ```text
//! <binary> clone -s [-i <key>] <url> <dest>
//! <binary> pull -s -i <key> <dest>
//! <binary> reset_hard <dest>
//! <binary> alladd <dest>
//! <binary> commit -s -n <name> -e <email> -m <message> <dest>
//! <binary> push -s -i <key> <dest>
//! <binary> checkout -r <ref> <dest>
//! <binary> log_remote -s -i <key> <url>     (JSON on stdout)
//! <binary> log_local <dest>                 (JSON on stdout)
//! ```
//!
//! `-s` disables strict host key checking. A non-zero exit is an error
//! carrying the captured stderr.

use serde_json::Value;
use std::ffi::{OsStr, OsString};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::domain::value_objects::{CancelToken, GitIdentity};
use crate::error::{SyncError, SyncResult};

/// Environment variable naming the embedded git binary
pub const GIT_BIN_ENV: &str = "SITESYNC_GIT_BIN";

/// Binary name looked up on `PATH` as a last resort
pub const DEFAULT_GIT_BINARY_NAME: &str = "embgit";

/// Upper bound for a single subprocess call
pub const DEFAULT_GIT_TIMEOUT: Duration = Duration::from_secs(600);

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Handle on the embedded git binary
#[derive(Debug, Clone)]
pub struct EmbeddedGit {
    binary: PathBuf,
    timeout: Duration,
}

impl EmbeddedGit {
    pub fn new(binary: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    /// Locate the binary: explicit path, then `SITESYNC_GIT_BIN`, then `PATH`
    pub fn resolve(configured: Option<&Path>, timeout: Duration) -> SyncResult<Self> {
        if let Some(path) = configured {
            return Self::existing(path.to_path_buf(), timeout);
        }
        if let Some(path) = std::env::var_os(GIT_BIN_ENV).filter(|v| !v.is_empty()) {
            return Self::existing(PathBuf::from(path), timeout);
        }
        let found = which::which(DEFAULT_GIT_BINARY_NAME).map_err(|e| {
            SyncError::GitBinaryNotFound(format!(
                "'{}' is not on PATH ({}); set {} or [git].binary",
                DEFAULT_GIT_BINARY_NAME, e, GIT_BIN_ENV
            ))
        })?;
        Ok(Self::new(found, timeout))
    }

    fn existing(path: PathBuf, timeout: Duration) -> SyncResult<Self> {
        if path.is_file() {
            Ok(Self::new(path, timeout))
        } else {
            Err(SyncError::GitBinaryNotFound(path.display().to_string()))
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run a subcommand to completion and return its stdout
    pub fn run<I, S>(&self, args: I, cancel: &CancelToken) -> SyncResult<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        cancel.check()?;
        let args: Vec<OsString> = args.into_iter().map(|a| a.as_ref().to_owned()).collect();
        let label = self.label(&args);
        tracing::debug!(command = %label, args = ?args, "running embedded git");

        let mut child = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    SyncError::GitBinaryNotFound(self.binary.display().to_string())
                } else {
                    SyncError::Io(e)
                }
            })?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        // On timeout or cancel the readers are left detached; a grandchild may
        // still hold the pipes open.
        let status = self.wait(&mut child, &label, cancel)?;
        let stdout = String::from_utf8_lossy(&stdout.join().unwrap_or_default()).into_owned();
        let stderr = String::from_utf8_lossy(&stderr.join().unwrap_or_default()).into_owned();

        if status.success() {
            Ok(stdout)
        } else {
            tracing::debug!(command = %label, code = ?status.code(), stderr = %stderr.trim(), "embedded git failed");
            Err(SyncError::ExternalProcessFailure {
                command: label,
                code: status.code(),
                stderr: stderr.trim().to_string(),
            })
        }
    }

    /// Run a subcommand that prints JSON on stdout
    pub fn run_json<I, S>(&self, args: I, cancel: &CancelToken) -> SyncResult<Value>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let out = self.run(args, cancel)?;
        let trimmed = out.trim();
        if trimmed.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(trimmed)?)
    }

    fn wait(
        &self,
        child: &mut Child,
        label: &str,
        cancel: &CancelToken,
    ) -> SyncResult<std::process::ExitStatus> {
        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            if cancel.is_cancelled() {
                kill(child);
                tracing::debug!(command = %label, "embedded git cancelled");
                return Err(SyncError::Cancelled);
            }
            if Instant::now() >= deadline {
                kill(child);
                return Err(SyncError::Timeout {
                    command: label.to_string(),
                    after: self.timeout,
                });
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    /// `<binary-name> <subcommand>` for messages
    fn label(&self, args: &[OsString]) -> String {
        let name = self
            .binary
            .file_name()
            .unwrap_or(self.binary.as_os_str())
            .to_string_lossy();
        match args.first() {
            Some(sub) => format!("{} {}", name, sub.to_string_lossy()),
            None => name.into_owned(),
        }
    }

    pub fn clone_repo(
        &self,
        url: &str,
        dest: &Path,
        key: Option<&Path>,
        cancel: &CancelToken,
    ) -> SyncResult<()> {
        let mut args: Vec<OsString> = vec!["clone".into(), "-s".into()];
        if let Some(key) = key {
            args.push("-i".into());
            args.push(key.into());
        }
        args.push(url.into());
        args.push(dest.into());
        self.run(args, cancel).map(drop)
    }

    pub fn pull(&self, dest: &Path, key: &Path, cancel: &CancelToken) -> SyncResult<()> {
        self.run(
            [OsStr::new("pull"), "-s".as_ref(), "-i".as_ref(), key.as_os_str(), dest.as_os_str()],
            cancel,
        )
        .map(drop)
    }

    pub fn reset_hard(&self, dest: &Path, cancel: &CancelToken) -> SyncResult<()> {
        self.run([OsStr::new("reset_hard"), dest.as_os_str()], cancel)
            .map(drop)
    }

    pub fn add_all(&self, dest: &Path, cancel: &CancelToken) -> SyncResult<()> {
        self.run([OsStr::new("alladd"), dest.as_os_str()], cancel)
            .map(drop)
    }

    pub fn commit(
        &self,
        dest: &Path,
        identity: &GitIdentity,
        message: &str,
        cancel: &CancelToken,
    ) -> SyncResult<()> {
        self.run(
            [
                OsStr::new("commit"),
                "-s".as_ref(),
                "-n".as_ref(),
                identity.name().as_ref(),
                "-e".as_ref(),
                identity.email().as_ref(),
                "-m".as_ref(),
                message.as_ref(),
                dest.as_os_str(),
            ],
            cancel,
        )
        .map(drop)
    }

    pub fn push(&self, dest: &Path, key: &Path, cancel: &CancelToken) -> SyncResult<()> {
        self.run(
            [OsStr::new("push"), "-s".as_ref(), "-i".as_ref(), key.as_os_str(), dest.as_os_str()],
            cancel,
        )
        .map(drop)
    }

    pub fn checkout(&self, dest: &Path, reference: &str, cancel: &CancelToken) -> SyncResult<()> {
        self.run(
            [OsStr::new("checkout"), "-r".as_ref(), reference.as_ref(), dest.as_os_str()],
            cancel,
        )
        .map(drop)
    }

    /// Commit history of the remote, as reported by the binary
    pub fn log_remote(&self, url: &str, key: &Path, cancel: &CancelToken) -> SyncResult<Value> {
        self.run_json(
            [OsStr::new("log_remote"), "-s".as_ref(), "-i".as_ref(), key.as_os_str(), url.as_ref()],
            cancel,
        )
    }

    /// Commit history of a local checkout
    pub fn log_local(&self, dest: &Path, cancel: &CancelToken) -> SyncResult<Value> {
        self.run_json([OsStr::new("log_local"), dest.as_os_str()], cancel)
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        buf
    })
}

fn kill(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}
