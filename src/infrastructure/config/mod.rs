//! Site configuration: the `sitesync.toml` file and the provider built from it

mod site_config;
mod site_provider;

pub use site_config::{
    resolve_path, ConfigWarning, GitSection, SiteConfigFile, SiteSection, SITE_CONFIG_FILE,
};
pub use site_provider::SiteConfigProvider;
