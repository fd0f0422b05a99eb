//! Sync Service Port
//!
//! The single entry point every publish backend implements. Callers pass
//! wire-level action names; each service maps them onto its own action enum
//! and rejects everything else with `ActionNotImplemented`.

use serde_json::Value;

use crate::domain::value_objects::CancelToken;
use crate::error::SyncResult;

/// A publish/sync backend (folder, git, legacy stubs)
pub trait SyncService: Send + Sync {
    /// Backend type name, used in error messages
    fn service_type(&self) -> &'static str;

    /// Run one named action to completion, failure, or cancellation
    fn dispatch(
        &self,
        action: &str,
        parameters: Option<&Value>,
        cancel: &CancelToken,
    ) -> SyncResult<Value>;

    /// Run one named action without a caller-held cancellation token
    fn action_dispatcher(&self, action: &str, parameters: Option<&Value>) -> SyncResult<Value> {
        self.dispatch(action, parameters, &CancelToken::new())
    }
}
