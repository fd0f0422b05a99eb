//! Publish ignore filter
//!
//! Decides which entries of a site tree never reach a publish destination.
//! Uses gitignore semantics via the `ignore` crate, so a bare name like
//! `.git` matches at any depth.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;

use crate::error::{SyncError, SyncResult};

/// Entries excluded from every publish copy: version-control metadata,
/// build caches and site-internal tooling directories
pub const DEFAULT_PUBLISH_IGNORES: [&str; 6] = [
    ".quiqr-cache",
    ".gitlab-ci.yml",
    ".gitignore",
    ".sukoh",
    ".hugo_build.lock",
    ".git",
];

/// Compiled ignore patterns for tree copies
#[derive(Debug, Clone)]
pub struct IgnoreFilter {
    matcher: Gitignore,
    pattern_count: usize,
}

impl Default for IgnoreFilter {
    fn default() -> Self {
        Self::publish_default()
    }
}

impl IgnoreFilter {
    /// Filter that matches nothing (plain copy)
    pub fn none() -> Self {
        Self {
            matcher: Gitignore::empty(),
            pattern_count: 0,
        }
    }

    /// The standard publish filter
    pub fn publish_default() -> Self {
        Self::from_patterns(DEFAULT_PUBLISH_IGNORES).expect("built-in ignore patterns are valid")
    }

    /// Compile gitignore-style patterns; blank lines and `#` comments are skipped
    pub fn from_patterns<I, S>(patterns: I) -> SyncResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GitignoreBuilder::new("");
        let mut pattern_count = 0;
        for pattern in patterns {
            Self::add_pattern(&mut builder, pattern.as_ref(), &mut pattern_count)?;
        }
        Self::build(builder, pattern_count)
    }

    /// The standard publish filter plus site-specific patterns
    pub fn publish_default_with<S: AsRef<str>>(extra: &[S]) -> SyncResult<Self> {
        let defaults = DEFAULT_PUBLISH_IGNORES.iter().map(|p| p.to_string());
        let extra = extra.iter().map(|p| p.as_ref().to_string());
        Self::from_patterns(defaults.chain(extra))
    }

    fn add_pattern(
        builder: &mut GitignoreBuilder,
        pattern: &str,
        count: &mut usize,
    ) -> SyncResult<()> {
        let trimmed = pattern.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(());
        }
        builder
            .add_line(None, trimmed)
            .map_err(|e| SyncError::IgnorePattern {
                pattern: trimmed.to_string(),
                message: e.to_string(),
            })?;
        *count += 1;
        Ok(())
    }

    fn build(builder: GitignoreBuilder, pattern_count: usize) -> SyncResult<Self> {
        let matcher = builder.build().map_err(|e| SyncError::IgnorePattern {
            pattern: "<set>".to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            matcher,
            pattern_count,
        })
    }

    /// Check a path relative to the copy root
    ///
    /// `is_dir` should be true if the path is a directory.
    pub fn is_ignored(&self, rel_path: &Path, is_dir: bool) -> bool {
        if rel_path.as_os_str().is_empty() {
            return false;
        }
        self.matcher
            .matched_path_or_any_parents(rel_path, is_dir)
            .is_ignore()
    }

    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    pub fn is_empty(&self) -> bool {
        self.pattern_count == 0
    }
}
