//! Domain Services
//!
//! Pure functions with no I/O dependencies.

mod git_url;

pub use git_url::build_git_url;
