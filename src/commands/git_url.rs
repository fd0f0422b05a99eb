//! git-url command handler

use anyhow::Result;

use sitesync::domain::services::build_git_url;
use sitesync::domain::value_objects::GitProtocol;

pub fn cmd_git_url(
    base_url: &str,
    org: &str,
    repo: &str,
    protocol: GitProtocol,
    port: u16,
    json: bool,
) -> Result<()> {
    let url = build_git_url(base_url, org, repo, protocol, port);
    if json {
        println!("{}", serde_json::json!({ "event": "git-url", "url": url }));
    } else {
        println!("{}", url);
    }
    Ok(())
}
