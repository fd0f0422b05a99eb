//! Application Layer
//!
//! Wires configured publish targets to their sync backends.
//! This layer:
//! - Depends on Domain layer (entities, ports)
//! - Does NOT contain sync logic (that lives in Infrastructure)
//! - Hands every backend the same set of collaborators
//!
//! ## Services
//!
//! - `SyncFactory` - Selects the backend for a `SyncConfig`
//! - `SerializedSyncService` - Runs one action at a time per publish target

mod serialized;
pub mod sync_factory;

pub use serialized::SerializedSyncService;
pub use sync_factory::{GitSettings, SyncDependencies, SyncFactory};
