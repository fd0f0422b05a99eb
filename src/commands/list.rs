//! List command handler

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use sitesync::domain::entities::{PublishConfig, SyncConfig};
use sitesync::domain::services::build_git_url;

use super::load_site_config;

#[derive(Debug, Serialize)]
struct TargetSummary<'a> {
    key: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    target: Option<String>,
}

fn summarize(publish: &PublishConfig) -> TargetSummary<'_> {
    let target = match &publish.config {
        SyncConfig::Folder(folder) => Some(folder.path.clone()),
        SyncConfig::Git(git) if !git.git_base_url.is_empty() => Some(build_git_url(
            &git.git_base_url,
            &git.username,
            &git.repository,
            git.git_protocol,
            git.ssh_port(),
        )),
        _ => None,
    };
    TargetSummary {
        key: &publish.key,
        kind: publish.config.kind(),
        target,
    }
}

pub fn cmd_list(config_path: &Path, json: bool) -> Result<()> {
    let config = load_site_config(config_path)?;
    let targets: Vec<_> = config.publish.iter().map(summarize).collect();

    if json {
        let out = serde_json::json!({
            "event": "list",
            "site": config.site.key,
            "targets": targets,
        });
        println!("{}", out);
        return Ok(());
    }

    if targets.is_empty() {
        println!("No publish targets in {}", config_path.display());
        return Ok(());
    }
    for target in &targets {
        println!(
            "{:<16} {:<8} {}",
            target.key,
            target.kind,
            target.target.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}
