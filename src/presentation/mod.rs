//! Presentation Layer
//!
//! This layer handles:
//! - Wiring a site configuration file into a `SyncFactory`
//! - Choosing how progress is reported (text/JSON)
//! - Logging setup for the binary
//!
//! ## Structure
//!
//! - `factory` - Creates the sync factory with proper dependencies (dependency injection)
//! - `output` - Output format and progress sink selection
//! - `logging` - `tracing` subscriber initialization
//!
//! ## Usage
//!
//! ```ignore
//! use sitesync::presentation::factory;
//!
//! let factory = factory::create_sync_factory(&site_config, progress);
//! let service = factory.get_serialized_publisher(publish, "blog", "main")?;
//! service.dispatch("hardPush", None, &cancel)?;
//! ```

pub mod factory;
pub mod logging;
pub mod output;

pub use factory::create_sync_factory;
pub use output::OutputFormat;
