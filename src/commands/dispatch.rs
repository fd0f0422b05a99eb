//! Dispatch command handler
//!
//! Resolves a publish target from the site config and runs one action on it.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde_json::Value;

use sitesync::domain::value_objects::CancelToken;
use sitesync::presentation::factory::create_sync_factory;
use sitesync::presentation::output::{OutputFormat, Reporter};

use super::load_site_config;

pub fn cmd_dispatch(
    config_path: &Path,
    publish_key: &str,
    action: &str,
    params: Option<&str>,
    workspace: Option<&str>,
    json: bool,
) -> Result<()> {
    let config = load_site_config(config_path)?;
    let publish = config.find_publish(publish_key).ok_or_else(|| {
        anyhow!(
            "no publish target '{}' in {}",
            publish_key,
            config_path.display()
        )
    })?;

    let params: Option<Value> = params
        .map(serde_json::from_str)
        .transpose()
        .context("--params is not valid JSON")?;

    let reporter = Reporter::new(OutputFormat::from_flag(json), "dispatch");
    let factory = create_sync_factory(&config, reporter.sink());
    let workspace = workspace.unwrap_or(&config.site.workspace);
    let service = factory.get_serialized_publisher(publish, &config.site.key, workspace)?;

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || handler_token.cancel()) {
        tracing::warn!("cannot install Ctrl-C handler: {}", e);
    }

    tracing::info!(
        site = %config.site.key,
        publish = publish_key,
        service = service.service_type(),
        "dispatching {}",
        action
    );
    let result = service.dispatch(action, params.as_ref(), &cancel).inspect_err(|e| {
        if e.is_retryable() {
            tracing::warn!("the next attempt starts again from a clean staging directory");
        }
    })?;
    reporter.result(&result);
    Ok(())
}
