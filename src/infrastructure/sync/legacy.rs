//! Legacy single-provider backends
//!
//! `github` and `sysgit` publish configs still parse, but their backends
//! are placeholders: every action is rejected with the action name.

use serde_json::Value;

use crate::domain::ports::SyncService;
use crate::domain::value_objects::CancelToken;
use crate::error::{SyncError, SyncResult};

/// Placeholder service that implements no action
#[derive(Debug, Clone, Copy)]
pub struct LegacySync {
    service_type: &'static str,
}

impl LegacySync {
    pub fn github() -> Self {
        Self {
            service_type: "github",
        }
    }

    pub fn sysgit() -> Self {
        Self {
            service_type: "sysgit",
        }
    }
}

impl SyncService for LegacySync {
    fn service_type(&self) -> &'static str {
        self.service_type
    }

    fn dispatch(
        &self,
        action: &str,
        _parameters: Option<&Value>,
        _cancel: &CancelToken,
    ) -> SyncResult<Value> {
        tracing::debug!(service = self.service_type, %action, "legacy backend rejects action");
        Err(SyncError::ActionNotImplemented {
            service: self.service_type,
            action: action.to_string(),
        })
    }
}
