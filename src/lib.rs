//! Sitesync - publish and sync engine for static sites
//!
//! Sitesync moves a site's build output (or its full source tree) to a
//! publish target: a local folder or a remote git repository on GitHub,
//! GitLab, Forgejo or any generic host. Git targets can receive a CI
//! workflow that rebuilds the site on push.
//!
//! ```ignore
//! use sitesync::presentation::factory::create_sync_factory;
//!
//! let factory = create_sync_factory(&site_config, progress);
//! let service = factory.get_serialized_publisher(publish, "blog", "main")?;
//! let result = service.action_dispatcher("hardPush", None)?;
//! ```

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{SyncDependencies, SyncFactory};
pub use domain::entities::{FolderConfig, GitConfig, PublishConfig, SyncConfig};
pub use domain::ports::SyncService;
pub use domain::services::build_git_url;
pub use domain::value_objects::{CancelToken, GitProtocol, GitProvider, PublishScope};
pub use error::{SyncError, SyncResult};
