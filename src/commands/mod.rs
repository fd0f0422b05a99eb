pub mod dispatch;
pub mod git_url;
pub mod list;
pub mod workflow;

use std::path::Path;

use anyhow::{Context, Result};
use sitesync::infrastructure::config::SiteConfigFile;

/// Load the site config, logging unknown keys as warnings
pub(crate) fn load_site_config(path: &Path) -> Result<SiteConfigFile> {
    let (config, warnings) = SiteConfigFile::load_with_warnings(path)
        .with_context(|| format!("failed to load {}", path.display()))?;

    for warning in &warnings {
        let location = match warning.line {
            Some(line) => format!("{}:{}", warning.file.display(), line),
            None => warning.file.display().to_string(),
        };
        match &warning.suggestion {
            Some(suggestion) => tracing::warn!(
                "unknown config key '{}' in {} (did you mean '{}'?)",
                warning.key,
                location,
                suggestion
            ),
            None => tracing::warn!("unknown config key '{}' in {}", warning.key, location),
        }
    }

    if config.site.key.trim().is_empty() {
        anyhow::bail!("{}: [site] key is required", path.display());
    }
    Ok(config)
}
