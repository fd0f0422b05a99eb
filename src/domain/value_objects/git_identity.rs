//! Git identity value object
//!
//! Author identity and key material for one clone/commit/push sequence.
//! Passed explicitly into every git call that needs it.

use std::path::{Path, PathBuf};

/// Author name used when the publish config has no username
pub const ANONYMOUS_NAME: &str = "anonymous";

/// Author email used when the publish config has no email
pub const ANONYMOUS_EMAIL: &str = "anonymous@sitesync.local";

/// Commit author plus the deploy key used for authentication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitIdentity {
    email: String,
    name: String,
    private_key_path: PathBuf,
}

impl GitIdentity {
    /// Build an identity, substituting the anonymous default for blank fields
    pub fn new(email: &str, name: &str, private_key_path: impl Into<PathBuf>) -> Self {
        let email = email.trim();
        let name = name.trim();
        Self {
            email: if email.is_empty() {
                ANONYMOUS_EMAIL.to_string()
            } else {
                email.to_string()
            },
            name: if name.is_empty() {
                ANONYMOUS_NAME.to_string()
            } else {
                name.to_string()
            },
            private_key_path: private_key_path.into(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn private_key_path(&self) -> &Path {
        &self.private_key_path
    }
}
