//! Action value objects - the named operations a sync service performs
//!
//! Wire names are case-sensitive camelCase strings kept for compatibility
//! with callers; inside the crate every service matches exhaustively on
//! its own enum.

/// Actions supported by the folder backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FolderAction {
    PullFromRemote,
    PushToRemote,
}

impl FolderAction {
    pub const ALL: [FolderAction; 2] = [FolderAction::PullFromRemote, FolderAction::PushToRemote];

    /// Parse a wire name; `None` for anything the folder backend does not know
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FolderAction::PullFromRemote => "pullFromRemote",
            FolderAction::PushToRemote => "pushToRemote",
        }
    }
}

/// Actions supported by the universal git backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GitAction {
    ReadRemote,
    RefreshRemote,
    CheckoutRef,
    PullFromRemote,
    HardPush,
    CheckoutLatest,
    PushWithSoftMerge,
}

impl GitAction {
    pub const ALL: [GitAction; 7] = [
        GitAction::ReadRemote,
        GitAction::RefreshRemote,
        GitAction::CheckoutRef,
        GitAction::PullFromRemote,
        GitAction::HardPush,
        GitAction::CheckoutLatest,
        GitAction::PushWithSoftMerge,
    ];

    /// Parse a wire name; `None` for anything the git backend does not know
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GitAction::ReadRemote => "readRemote",
            GitAction::RefreshRemote => "refreshRemote",
            GitAction::CheckoutRef => "checkoutRef",
            GitAction::PullFromRemote => "pullFromRemote",
            GitAction::HardPush => "hardPush",
            GitAction::CheckoutLatest => "checkoutLatest",
            GitAction::PushWithSoftMerge => "pushWithSoftMerge",
        }
    }

    /// Returns true if the action writes to the remote
    pub fn is_push(&self) -> bool {
        matches!(self, GitAction::HardPush | GitAction::PushWithSoftMerge)
    }
}

impl std::fmt::Display for FolderAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for GitAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
