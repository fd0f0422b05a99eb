//! Git remote URL grammar
//!
//! The embedded git binary parses these strings itself, so the shapes are
//! fixed:
//!
//! - ssh, port 22: `git@<host>:<org>/<repo>.git`
//! - ssh, other port: `ssh://git@<host>:<port>/<org>/<repo>.git`
//! - https: `<scheme>://<baseUrl>/<org>/<repo>.git`, where the scheme is
//!   `http` for `localhost` / `127.0.0.1` bases

use crate::domain::entities::DEFAULT_SSH_PORT;
use crate::domain::value_objects::GitProtocol;

/// Build the remote URL for a repository
///
/// For ssh the host is `base_url` with any `:port` suffix removed; the
/// https form keeps `base_url` verbatim.
pub fn build_git_url(
    base_url: &str,
    org: &str,
    repo: &str,
    protocol: GitProtocol,
    ssh_port: u16,
) -> String {
    let repo = if repo.ends_with(".git") {
        repo.to_string()
    } else {
        format!("{}.git", repo)
    };

    match protocol {
        GitProtocol::Ssh => {
            let host = base_url.split(':').next().unwrap_or(base_url);
            if ssh_port == DEFAULT_SSH_PORT {
                format!("git@{}:{}/{}", host, org, repo)
            } else {
                format!("ssh://git@{}:{}/{}/{}", host, ssh_port, org, repo)
            }
        }
        GitProtocol::Https => {
            let scheme = if base_url.starts_with("localhost") || base_url.starts_with("127.0.0.1")
            {
                "http"
            } else {
                "https"
            };
            format!("{}://{}/{}/{}", scheme, base_url, org, repo)
        }
    }
}
