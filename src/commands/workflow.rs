//! Workflow command handler
//!
//! Prints or writes the CI workflow a git target would receive.

use std::path::Path;

use anyhow::{bail, Result};

use sitesync::domain::ports::WorkflowOptions;
use sitesync::domain::value_objects::GitProvider;
use sitesync::infrastructure::ci::{all_ci_configurators, get_ci_configurator};

pub fn cmd_workflow(
    provider: &str,
    branch: &str,
    hugo_version: Option<String>,
    base_url: Option<String>,
    write: Option<&Path>,
    json: bool,
) -> Result<()> {
    let Some(configurator) = get_ci_configurator(GitProvider::from_name(provider)) else {
        let known: Vec<_> = all_ci_configurators()
            .iter()
            .map(|c| c.name())
            .collect();
        bail!(
            "no CI workflow for provider '{}' (available: {})",
            provider,
            known.join(", ")
        );
    };

    let options = WorkflowOptions::new(branch)
        .with_hugo_version(hugo_version)
        .with_override_base_url(base_url);

    match write {
        Some(dir) => {
            let path = configurator.write_workflow(dir, &options)?;
            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "event": "workflow",
                        "provider": configurator.name(),
                        "path": path.display().to_string(),
                    })
                );
            } else {
                println!("Wrote {} workflow to {}", configurator.name(), path.display());
            }
        }
        None if json => println!(
            "{}",
            serde_json::json!({
                "event": "workflow",
                "provider": configurator.name(),
                "path": configurator.workflow_path(),
                "content": configurator.render(&options),
            })
        ),
        None => print!("{}", configurator.render(&options)),
    }
    Ok(())
}
