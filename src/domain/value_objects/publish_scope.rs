//! Publish scope value object - defines which tree gets published
//!
//! - `Build`: only the generated `public/` output
//! - `Source`: the site sources, without `public/`
//! - `BuildAndSource`: the whole build tree including `public/`

use serde::{Deserialize, Serialize};

/// Which part of a site a publish target receives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PublishScope {
    /// Rendered output only (`<buildDir>/public`)
    #[default]
    Build,
    /// Site sources (CI builds them remotely)
    Source,
    /// Sources plus rendered output
    BuildAndSource,
}

impl PublishScope {
    /// Returns true if only the rendered output is published
    pub fn is_build_only(&self) -> bool {
        matches!(self, PublishScope::Build)
    }

    /// Returns true if this is strictly the source scope
    pub fn is_source_only(&self) -> bool {
        matches!(self, PublishScope::Source)
    }

    /// Wire name as stored in publish configs
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishScope::Build => "build",
            PublishScope::Source => "source",
            PublishScope::BuildAndSource => "build_and_source",
        }
    }
}

impl std::fmt::Display for PublishScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
