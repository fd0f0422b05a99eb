//! `sitesync.toml` site configuration
//!
//! ```toml
//! [site]
//! key = "my-site"
//! workspace = "main"
//! source = "/path/to/site"
//! build_dir = "/path/to/build"
//! hugo_version = "0.118.2"
//! data_dir = "~/.local/share/sitesync"
//! ignore = ["drafts/"]
//!
//! [git]
//! binary = "/usr/local/bin/embgit"
//! timeout_secs = 600
//!
//! [[publish]]
//! key = "production"
//! [publish.config]
//! type = "git"
//! gitProvider = "github"
//! ```
//!
//! Relative paths are resolved against the directory of the file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::entities::{FolderConfig, GitConfig, PublishConfig, SyncConfig};
use crate::error::{SyncError, SyncResult};
use crate::infrastructure::fs::default_data_root;
use crate::infrastructure::git::DEFAULT_GIT_TIMEOUT;

/// Default file name looked up in the working directory
pub const SITE_CONFIG_FILE: &str = "sitesync.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    pub key: String,
    pub workspace: String,
    pub source: Option<PathBuf>,
    pub build_dir: Option<PathBuf>,
    pub hugo_version: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub ignore: Vec<String>,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            key: String::new(),
            workspace: "main".to_string(),
            source: None,
            build_dir: None,
            hugo_version: None,
            data_dir: None,
            ignore: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GitSection {
    pub binary: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

/// Parsed site configuration file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfigFile {
    pub site: SiteSection,
    pub git: GitSection,
    pub publish: Vec<PublishConfig>,
}

impl SiteConfigFile {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> SyncResult<Self> {
        let (config, _warnings) = Self::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> SyncResult<(Self, Vec<ConfigWarning>)> {
        let content = fs::read_to_string(path).map_err(|e| SyncError::ConfigFile {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let (mut config, warnings) = Self::parse(&content, path)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok((config, warnings))
    }

    /// Parse TOML text; `path` is only used in messages
    pub fn parse(content: &str, path: &Path) -> SyncResult<(Self, Vec<ConfigWarning>)> {
        let mut unknown_paths: Vec<String> = Vec::new();
        let deserializer = toml::de::Deserializer::new(content);

        let config: Self = serde_ignored::deserialize(deserializer, |p| {
            unknown_paths.push(p.to_string());
        })
        .map_err(|e| SyncError::ConfigFile {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;
        unknown_paths.extend(unknown_publish_keys(content));

        let warnings = unknown_paths
            .into_iter()
            .map(|path_str| {
                let key = path_str
                    .split('.')
                    .next_back()
                    .unwrap_or(path_str.as_str())
                    .to_string();
                ConfigWarning {
                    key: key.clone(),
                    file: path.to_path_buf(),
                    line: find_line_number(content, &key),
                    suggestion: suggest_key(&key),
                }
            })
            .collect();

        Ok((config, warnings))
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut Option<PathBuf>| {
            if let Some(path) = p.take() {
                *p = Some(resolve_path(base, &path));
            }
        };
        resolve(&mut self.site.source);
        resolve(&mut self.site.build_dir);
        resolve(&mut self.site.data_dir);
        resolve(&mut self.git.binary);
        for publish in &mut self.publish {
            if let SyncConfig::Folder(folder) = &mut publish.config {
                let path = folder.path.trim();
                if !path.is_empty() {
                    folder.path = resolve_path(base, Path::new(path))
                        .to_string_lossy()
                        .into_owned();
                }
            }
        }
    }

    /// Look up a publish target by key
    pub fn find_publish(&self, key: &str) -> Option<&PublishConfig> {
        self.publish.iter().find(|p| p.key == key)
    }

    /// Configured data root, else the default one
    pub fn data_root(&self) -> PathBuf {
        self.site
            .data_dir
            .clone()
            .unwrap_or_else(default_data_root)
    }

    pub fn git_timeout(&self) -> Duration {
        self.git
            .timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_GIT_TIMEOUT)
    }
}

/// Expand `~/` and make relative paths absolute against `base`
pub fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    let expanded = match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    };
    if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    }
}

/// Unknown keys inside `[publish.config]` tables
///
/// `SyncConfig` decodes through an intermediate value, so the outer
/// `serde_ignored` pass never sees its fields; each table is checked again
/// against the struct of its `type`.
fn unknown_publish_keys(content: &str) -> Vec<String> {
    let Ok(raw) = toml::from_str::<toml::Value>(content) else {
        return Vec::new();
    };
    let Some(targets) = raw.get("publish").and_then(toml::Value::as_array) else {
        return Vec::new();
    };

    let mut unknown = Vec::new();
    for (index, target) in targets.iter().enumerate() {
        let Some(Ok(serde_json::Value::Object(mut fields))) =
            target.get("config").map(serde_json::to_value)
        else {
            continue;
        };
        let kind = match fields.remove("type") {
            Some(serde_json::Value::String(kind)) => kind,
            _ => continue,
        };
        let value = serde_json::Value::Object(fields);
        let mut ignored = Vec::new();
        // Type errors were already reported by the main pass
        let _ = match kind.as_str() {
            "folder" => serde_ignored::deserialize(value, |p| ignored.push(p.to_string()))
                .map(|_: FolderConfig| ()),
            "git" => serde_ignored::deserialize(value, |p| ignored.push(p.to_string()))
                .map(|_: GitConfig| ()),
            _ => Ok(()),
        };
        unknown.extend(
            ignored
                .into_iter()
                .map(|field| format!("publish.{}.config.{}", index, field)),
        );
    }
    unknown
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "site",
        "key",
        "workspace",
        "source",
        "build_dir",
        "hugo_version",
        "data_dir",
        "ignore",
        "git",
        "binary",
        "timeout_secs",
        "publish",
        "config",
        "type",
        "path",
        "publishScope",
        "gitProvider",
        "gitBaseUrl",
        "gitProtocol",
        "sshPort",
        "username",
        "repository",
        "branch",
        "email",
        "deployPrivateKey",
        "deployPublicKey",
        "setCIWorkflow",
        "CNAMESwitch",
        "CNAME",
        "overrideBaseURLSwitch",
        "overrideBaseURL",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
