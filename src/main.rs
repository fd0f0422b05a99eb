//! Sitesync CLI - publish static sites to folders and git hosts
//!
//! Usage: sitesync <COMMAND>
//!
//! Commands:
//!   dispatch  Run a sync action on a configured publish target
//!   list      List the publish targets of a site
//!   git-url   Print the remote URL for a git host
//!   workflow  Render the CI workflow of a git provider

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    sitesync::presentation::logging::init(cli.verbose);

    match cli.command {
        Commands::Dispatch {
            publish_key,
            action,
            params,
            workspace,
            config,
        } => commands::dispatch::cmd_dispatch(
            &config,
            &publish_key,
            &action,
            params.as_deref(),
            workspace.as_deref(),
            cli.json,
        ),
        Commands::List { config } => commands::list::cmd_list(&config, cli.json),
        Commands::GitUrl {
            base_url,
            org,
            repo,
            protocol,
            port,
        } => commands::git_url::cmd_git_url(&base_url, &org, &repo, protocol, port, cli.json),
        Commands::Workflow {
            provider,
            branch,
            hugo_version,
            base_url,
            write,
        } => commands::workflow::cmd_workflow(
            &provider,
            &branch,
            hugo_version,
            base_url,
            write.as_deref(),
            cli.json,
        ),
    }
}
