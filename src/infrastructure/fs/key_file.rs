//! Temporary deploy key material
//!
//! The deploy key lives on disk only for the duration of one git sequence.
//! The file is created with owner-only permissions and removed on drop,
//! so every exit path (success, error, cancellation) cleans it up.

use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::error::SyncResult;

/// A private key written to a scratch file, deleted when dropped
#[derive(Debug)]
pub struct TemporaryPrivateKey {
    file: NamedTempFile,
}

impl TemporaryPrivateKey {
    /// Write `material` verbatim into a new file under `dir`
    pub fn write(dir: &Path, material: &str) -> SyncResult<Self> {
        std::fs::create_dir_all(dir)?;
        let mut file = tempfile::Builder::new()
            .prefix("deploy-key-")
            .rand_bytes(12)
            .tempfile_in(dir)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(file.path(), std::fs::Permissions::from_mode(0o600))?;
        }

        file.write_all(material.as_bytes())?;
        file.flush()?;
        tracing::debug!(path = %file.path().display(), "wrote temporary deploy key");
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
