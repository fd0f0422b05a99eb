//! Cross-process staging lock
//!
//! Publishes in one staging scope of a site share a temp root or a staging
//! checkout. In-process callers are serialized by the factory; this lock
//! covers separate processes working on the same data root.

use fs2::FileExt;
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::error::{SyncError, SyncResult};

/// Exclusive advisory lock, released on drop
#[derive(Debug)]
pub struct StagingLock {
    file: File,
    path: PathBuf,
}

impl StagingLock {
    /// Block until the lock for `(site_key, scope)` is held
    pub fn acquire(lock_dir: &Path, site_key: &str, scope: &str) -> SyncResult<Self> {
        fs::create_dir_all(lock_dir)?;
        let path = lock_dir.join(lock_file_name(site_key, scope));
        let file = File::create(&path).map_err(|e| SyncError::LockFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        file.lock_exclusive().map_err(|e| SyncError::LockFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        tracing::trace!(path = %path.display(), "acquired staging lock");
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagingLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

/// Stable, filesystem-safe lock name for a staging scope
pub fn lock_file_name(site_key: &str, scope: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(site_key.as_bytes());
    hasher.update([0u8]);
    hasher.update(scope.as_bytes());
    let digest = hasher.finalize();
    let hex: String = digest[..8].iter().map(|b| format!("{:02x}", b)).collect();
    format!("publish-{}.lock", hex)
}
