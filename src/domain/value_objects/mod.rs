//! Domain Value Objects
//!
//! Immutable value types that represent publish/sync concepts.

mod action;
mod cancel;
mod git_identity;
mod git_provider;
mod progress;
mod publish_scope;

pub use action::{FolderAction, GitAction};
pub use cancel::CancelToken;
pub use git_identity::GitIdentity;
pub use git_provider::{GitProtocol, GitProvider};
pub use progress::ProgressEvent;
pub use publish_scope::PublishScope;
