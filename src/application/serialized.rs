//! Serialization of sync actions over shared staging state
//!
//! The temp root and staging checkouts of a site are not safe for
//! concurrent use. Every action first takes the in-process guard of its
//! staging scope, then the cross-process lock file.

use serde_json::Value;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::ports::SyncService;
use crate::domain::value_objects::CancelToken;
use crate::error::SyncResult;
use crate::infrastructure::fs::StagingLock;

/// Wraps a service so its actions run one at a time per staging scope
pub struct SerializedSyncService {
    inner: Box<dyn SyncService>,
    guard: Arc<Mutex<()>>,
    lock_dir: PathBuf,
    site_key: String,
    scope: String,
}

impl SerializedSyncService {
    pub fn new(
        inner: Box<dyn SyncService>,
        guard: Arc<Mutex<()>>,
        lock_dir: PathBuf,
        site_key: &str,
        scope: &str,
    ) -> Self {
        Self {
            inner,
            guard,
            lock_dir,
            site_key: site_key.to_string(),
            scope: scope.to_string(),
        }
    }
}

impl SyncService for SerializedSyncService {
    fn service_type(&self) -> &'static str {
        self.inner.service_type()
    }

    fn dispatch(
        &self,
        action: &str,
        parameters: Option<&Value>,
        cancel: &CancelToken,
    ) -> SyncResult<Value> {
        let _local = self.guard.lock().unwrap_or_else(PoisonError::into_inner);
        cancel.check()?;
        let _file = StagingLock::acquire(&self.lock_dir, &self.site_key, &self.scope)?;
        tracing::trace!(site = %self.site_key, scope = %self.scope, %action, "staging locked");
        self.inner.dispatch(action, parameters, cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;
    use tempfile::tempdir;

    #[derive(Default)]
    struct Probe {
        active: AtomicUsize,
        max_active: AtomicUsize,
    }

    struct SlowService(Arc<Probe>);

    impl SyncService for SlowService {
        fn service_type(&self) -> &'static str {
            "slow"
        }

        fn dispatch(&self, _: &str, _: Option<&Value>, _: &CancelToken) -> SyncResult<Value> {
            let now = self.0.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.0.max_active.fetch_max(now, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(30));
            self.0.active.fetch_sub(1, Ordering::SeqCst);
            Ok(Value::Null)
        }
    }

    #[test]
    fn actions_in_one_scope_never_overlap() {
        let dir = tempdir().unwrap();
        let probe = Arc::new(Probe::default());
        let guard = Arc::new(Mutex::new(()));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let service = SerializedSyncService::new(
                    Box::new(SlowService(probe.clone())),
                    guard.clone(),
                    dir.path().to_path_buf(),
                    "blog",
                    "git",
                );
                thread::spawn(move || service.action_dispatcher("hardPush", None).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(probe.max_active.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn cancelled_token_skips_inner_service() {
        let dir = tempdir().unwrap();
        let probe = Arc::new(Probe::default());
        let service = SerializedSyncService::new(
            Box::new(SlowService(probe.clone())),
            Arc::new(Mutex::new(())),
            dir.path().to_path_buf(),
            "blog",
            "git",
        );
        let cancel = CancelToken::new();
        cancel.cancel();

        assert!(service.dispatch("hardPush", None, &cancel).is_err());
        assert_eq!(probe.max_active.load(Ordering::SeqCst), 0);
    }
}
