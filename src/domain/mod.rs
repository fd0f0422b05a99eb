//! Domain Layer
//!
//! Pure publish/sync types and the ports the infrastructure implements.
//!
//! ## Structure
//!
//! - `entities/` - Persisted records (PublishConfig and its variants)
//! - `value_objects/` - Immutable values (scope, provider, actions, progress)
//! - `services/` - Pure functions (git URL grammar)
//! - `ports/` - Interface definitions for infrastructure
//!
//! Nothing in this layer touches the file system or spawns processes.

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
