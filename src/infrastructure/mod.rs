//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Staging directories, ignore rules, key files, locks
//! - `git/` - Embedded git binary wrapper
//! - `ci/` - CI workflow writers (GitHub, GitLab, Forgejo)
//! - `config/` - Site configuration file
//! - `events/` - Progress sinks and consoles
//! - `sync/` - Folder and git sync backends

pub mod ci;
pub mod config;
pub mod events;
pub mod fs;
pub mod git;
pub mod sync;

// Re-export for convenience
pub use ci::{all_ci_configurators, get_ci_configurator};
pub use config::{SiteConfigFile, SiteConfigProvider};
pub use fs::{IgnoreFilter, SitePaths};
pub use git::EmbeddedGit;
pub use sync::{FolderSync, GitSync, LegacySync};
