//! Publish tree assembly
//!
//! Shared by the folder and git backends: which part of the build output
//! reaches the destination depends on the publish scope.
//!
//! - `build`: `<build>/public` only
//! - `source`: the whole build tree without `public/`, plus `static/`
//! - `build_and_source`: the whole build tree, plus `static/`

use std::path::Path;

use crate::domain::value_objects::{CancelToken, PublishScope};
use crate::error::{SyncError, SyncResult};
use crate::infrastructure::fs::{
    copy_tree, ensure_dir, remove_artifacts_except, remove_path, CopyStats, IgnoreFilter,
};

/// Directory of generated output inside a build
pub const PUBLIC_DIR: &str = "public";

/// Hugo static assets directory
pub const STATIC_DIR: &str = "static";

/// Fail with `NoBuildAvailable` when `build_dir` has nothing to publish
/// for `scope`; callers check this before touching the destination
pub fn check_publishable(site_key: &str, build_dir: &Path, scope: PublishScope) -> SyncResult<()> {
    if scope.is_build_only() && !build_dir.join(PUBLIC_DIR).is_dir() {
        return Err(SyncError::NoBuildAvailable {
            site: site_key.to_string(),
        });
    }
    Ok(())
}

/// Copy the scoped part of `build_dir` into `dest` (which may hold `.git`)
pub fn stage_publish_tree(
    site_key: &str,
    build_dir: &Path,
    dest: &Path,
    scope: PublishScope,
    filter: &IgnoreFilter,
    cancel: &CancelToken,
) -> SyncResult<CopyStats> {
    check_publishable(site_key, build_dir, scope)?;
    let stats = if scope.is_build_only() {
        let public = build_dir.join(PUBLIC_DIR);
        let stats = copy_tree(&public, dest, filter, cancel)?;
        strip_artifacts(dest)?;
        stats
    } else {
        let stats = copy_tree(build_dir, dest, filter, cancel)?;
        strip_artifacts(dest)?;
        if scope.is_source_only() {
            remove_path(&dest.join(PUBLIC_DIR))?;
        }
        ensure_dir(&dest.join(STATIC_DIR))?;
        stats
    };
    tracing::debug!(
        site = site_key,
        scope = scope.as_str(),
        files = stats.files,
        "staged publish tree"
    );
    Ok(stats)
}

/// Remove artifacts but keep a `.git` the caller put there on purpose
fn strip_artifacts(dest: &Path) -> SyncResult<()> {
    remove_artifacts_except(dest, &[".git"])?;
    Ok(())
}
