//! Domain Entities
//!
//! Persisted records supplied by the configuration layer.
//! - `PublishConfig` - one named sync target of a site
//! - `SyncConfig` - the backend-specific settings, tagged by `type`

mod publish_config;

pub use publish_config::{
    FolderConfig, GitConfig, LegacyConfig, PublishConfig, SyncConfig, DEFAULT_SSH_PORT,
};
