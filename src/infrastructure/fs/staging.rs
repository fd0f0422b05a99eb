//! Directory staging primitives
//!
//! Everything a publish does to the filesystem goes through here: emptying
//! staging directories, filtered tree copies and artifact cleanup.

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::ignore_filter::{IgnoreFilter, DEFAULT_PUBLISH_IGNORES};
use crate::domain::value_objects::CancelToken;
use crate::error::SyncResult;

/// Counters from a tree copy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    pub files: usize,
    pub dirs: usize,
    pub skipped: usize,
}

/// Create a directory and all of its parents
pub fn ensure_dir(path: &Path) -> SyncResult<()> {
    fs::create_dir_all(path)?;
    Ok(())
}

/// Remove a file, symlink or directory tree; missing paths are fine
pub fn remove_path(path: &Path) -> SyncResult<()> {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };
    if meta.is_dir() {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
    }
    Ok(())
}

/// Remove every child of `dir`, keeping `dir` itself
pub fn empty_dir(dir: &Path) -> SyncResult<()> {
    if !dir.exists() {
        return Ok(());
    }
    for entry in fs::read_dir(dir)? {
        remove_path(&entry?.path())?;
    }
    Ok(())
}

/// Guarantee `dir` exists and is empty
///
/// Idempotent: calling it on an already empty directory is a no-op.
pub fn ensure_sync_dir_empty(dir: &Path) -> SyncResult<()> {
    ensure_dir(dir)?;
    empty_dir(dir)?;
    ensure_dir(dir)
}

/// Recursively copy the contents of `src` into `dest`
///
/// Entries matched by `filter` are skipped (ignored directories are pruned
/// whole). Existing files in `dest` are overwritten; files in `dest` that
/// have no counterpart in `src` are left alone.
pub fn copy_tree(
    src: &Path,
    dest: &Path,
    filter: &IgnoreFilter,
    cancel: &CancelToken,
) -> SyncResult<CopyStats> {
    ensure_dir(dest)?;
    let mut stats = CopyStats::default();

    let walker = WalkDir::new(src)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let rel = entry.path().strip_prefix(src).unwrap_or(entry.path());
            !filter.is_ignored(rel, entry.file_type().is_dir())
        });

    for entry in walker {
        cancel.check()?;
        let entry = entry?;
        let rel = match entry.path().strip_prefix(src) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel,
            _ => continue,
        };
        let target = dest.join(rel);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            if target.exists() && !target.is_dir() {
                remove_path(&target)?;
            }
            ensure_dir(&target)?;
            stats.dirs += 1;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
            stats.files += 1;
        } else if file_type.is_file() {
            if target.is_dir() {
                remove_path(&target)?;
            }
            fs::copy(entry.path(), &target)?;
            stats.files += 1;
        } else {
            stats.skipped += 1;
        }
    }

    tracing::debug!(
        src = %src.display(),
        dest = %dest.display(),
        files = stats.files,
        dirs = stats.dirs,
        "copied tree"
    );
    Ok(stats)
}

#[cfg(unix)]
fn copy_symlink(src: &Path, target: &Path) -> SyncResult<()> {
    let link = fs::read_link(src)?;
    remove_path(target)?;
    std::os::unix::fs::symlink(link, target)?;
    Ok(())
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, target: &Path) -> SyncResult<()> {
    if src.is_dir() {
        return Ok(());
    }
    remove_path(target)?;
    fs::copy(src, target)?;
    Ok(())
}

/// Remove top-level publish artifacts (VCS metadata, build locks, tool caches)
/// other than the names in `keep`
///
/// Returns the paths that were actually removed.
pub fn remove_artifacts_except(dir: &Path, keep: &[&str]) -> SyncResult<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for name in DEFAULT_PUBLISH_IGNORES.iter().filter(|n| !keep.contains(*n)) {
        let path = dir.join(name);
        if fs::symlink_metadata(&path).is_ok() {
            remove_path(&path)?;
            removed.push(path);
        }
    }
    Ok(removed)
}
