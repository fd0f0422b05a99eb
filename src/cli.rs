use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sitesync::domain::entities::DEFAULT_SSH_PORT;
use sitesync::domain::value_objects::GitProtocol;
use sitesync::infrastructure::config::SITE_CONFIG_FILE;

/// Sitesync - publish static sites to folders and git hosts
#[derive(Parser, Debug)]
#[command(name = "sitesync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output NDJSON events and results
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a sync action on a configured publish target
    Dispatch {
        /// Publish target key from the site config
        publish_key: String,

        /// Action name (e.g. pushToRemote, hardPush, checkoutRef)
        action: String,

        /// Action parameters as a JSON object
        #[arg(long)]
        params: Option<String>,

        /// Workspace to publish (defaults to the config's workspace)
        #[arg(long)]
        workspace: Option<String>,

        /// Site configuration file
        #[arg(short, long, default_value = SITE_CONFIG_FILE)]
        config: PathBuf,
    },

    /// List the publish targets of a site
    List {
        /// Site configuration file
        #[arg(short, long, default_value = SITE_CONFIG_FILE)]
        config: PathBuf,
    },

    /// Print the remote URL for a git host, organization and repository
    GitUrl {
        /// Host name, optionally with a path (e.g. git.example.org/team)
        base_url: String,

        /// Organization or user
        org: String,

        /// Repository name (".git" is appended when missing)
        repo: String,

        /// Transport: ssh or https
        #[arg(long, default_value = "ssh")]
        protocol: GitProtocol,

        /// SSH port; anything but 22 switches to ssh:// form
        #[arg(long, default_value_t = DEFAULT_SSH_PORT)]
        port: u16,
    },

    /// Render the CI workflow of a git provider
    Workflow {
        /// Provider: github, gitlab or forgejo
        provider: String,

        /// Branch that triggers the workflow
        #[arg(long, default_value = "main")]
        branch: String,

        /// Hugo version to install
        #[arg(long)]
        hugo_version: Option<String>,

        /// Base URL passed to `hugo --baseURL`
        #[arg(long)]
        base_url: Option<String>,

        /// Write into this repository checkout instead of printing
        #[arg(long, value_name = "DIR")]
        write: Option<PathBuf>,
    },
}
