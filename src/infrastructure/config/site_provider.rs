//! ConfigurationProvider over a single site's settings

use std::path::PathBuf;

use super::site_config::SiteConfigFile;
use crate::domain::ports::ConfigurationProvider;
use crate::error::{SyncError, SyncResult};

/// Site metadata for one site key
#[derive(Debug, Clone, Default)]
pub struct SiteConfigProvider {
    site_key: String,
    source: Option<PathBuf>,
    hugo_version: Option<String>,
    ignore: Vec<String>,
}

impl SiteConfigProvider {
    pub fn new(site_key: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            site_key: site_key.into(),
            source: Some(source.into()),
            ..Self::default()
        }
    }

    pub fn from_file(file: &SiteConfigFile) -> Self {
        Self {
            site_key: file.site.key.clone(),
            source: file.site.source.clone(),
            hugo_version: file.site.hugo_version.clone(),
            ignore: file.site.ignore.clone(),
        }
    }

    pub fn with_hugo_version(mut self, version: impl Into<String>) -> Self {
        self.hugo_version = Some(version.into());
        self
    }

    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore = patterns;
        self
    }

    fn check_site(&self, site_key: &str) -> SyncResult<()> {
        if self.site_key.is_empty() || self.site_key == site_key {
            Ok(())
        } else {
            Err(SyncError::InvalidConfig(format!(
                "unknown site '{}' (configured site is '{}')",
                site_key, self.site_key
            )))
        }
    }
}

impl ConfigurationProvider for SiteConfigProvider {
    fn site_source_path(&self, site_key: &str, _workspace_key: &str) -> SyncResult<PathBuf> {
        self.check_site(site_key)?;
        self.source
            .clone()
            .ok_or(SyncError::SyncNotConfigured { field: "source" })
    }

    fn hugo_version(&self, site_key: &str, _workspace_key: &str) -> Option<String> {
        self.check_site(site_key).ok()?;
        self.hugo_version.clone()
    }

    fn extra_ignore_patterns(&self, site_key: &str) -> Vec<String> {
        if self.check_site(site_key).is_ok() {
            self.ignore.clone()
        } else {
            Vec::new()
        }
    }
}
