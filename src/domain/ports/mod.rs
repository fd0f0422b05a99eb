//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! The infrastructure layer provides concrete implementations.

pub mod ci_configurator;
pub mod configuration_provider;
pub mod output_console;
pub mod path_helper;
pub mod progress_sink;
pub mod sync_service;

pub use ci_configurator::{CiConfigurator, WorkflowOptions, DEFAULT_HUGO_VERSION};
pub use configuration_provider::ConfigurationProvider;
pub use output_console::{NoopConsole, OutputConsole};
pub use path_helper::PathHelper;
pub use progress_sink::{NoopProgressSink, ProgressSink};
pub use sync_service::SyncService;
