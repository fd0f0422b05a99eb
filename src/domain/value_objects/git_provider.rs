//! Git hosting provider and transport protocol value objects

use serde::{Deserialize, Serialize};

/// Git hosting provider of a publish target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GitProvider {
    /// GitHub (Actions + Pages)
    #[default]
    Github,
    /// GitLab (GitLab CI + Pages)
    Gitlab,
    /// Forgejo / Gitea (Forgejo Actions)
    Forgejo,
    /// Any other git server, no CI generation
    Generic,
    /// Unrecognized provider name
    #[serde(other)]
    Unknown,
}

impl GitProvider {
    /// Providers with a known wire name
    pub const KNOWN: [GitProvider; 4] = [
        GitProvider::Github,
        GitProvider::Gitlab,
        GitProvider::Forgejo,
        GitProvider::Generic,
    ];

    /// Parse a provider name; unrecognized names map to `Unknown`
    pub fn from_name(name: &str) -> Self {
        Self::KNOWN
            .into_iter()
            .find(|p| p.as_str() == name)
            .unwrap_or(GitProvider::Unknown)
    }

    /// Wire name as stored in publish configs
    pub fn as_str(&self) -> &'static str {
        match self {
            GitProvider::Github => "github",
            GitProvider::Gitlab => "gitlab",
            GitProvider::Forgejo => "forgejo",
            GitProvider::Generic => "generic",
            GitProvider::Unknown => "unknown",
        }
    }

    /// Name of the per-site persistent staging directory
    pub fn staging_dir_name(&self) -> String {
        format!("{}SyncRepo", self.as_str())
    }

    /// Get a human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            GitProvider::Github => "GitHub",
            GitProvider::Gitlab => "GitLab",
            GitProvider::Forgejo => "Forgejo",
            GitProvider::Generic => "Git",
            GitProvider::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for GitProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Transport used to reach the git remote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GitProtocol {
    #[default]
    Ssh,
    Https,
}

impl GitProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            GitProtocol::Ssh => "ssh",
            GitProtocol::Https => "https",
        }
    }
}

impl std::str::FromStr for GitProtocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ssh" => Ok(GitProtocol::Ssh),
            "https" => Ok(GitProtocol::Https),
            other => Err(format!("unknown git protocol '{}'", other)),
        }
    }
}
