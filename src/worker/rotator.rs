//! Log rotator
//!
//! Freezes each non-empty active log into a timestamped compressed artifact
//! and truncates the active stream back to empty. Truncation strictly
//! follows a successful artifact write; on any failure the active stream is
//! left untouched and the id is retried on the next rotation tick.

use std::sync::Arc;

use tracing::{debug, error, instrument, trace};

use crate::logs::LogStore;
use crate::worker::locks::IdLocks;

/// Rotator for per-check log streams
pub struct LogRotator {
    store: Arc<dyn LogStore>,
    locks: Arc<IdLocks>,
}

impl LogRotator {
    pub fn new(store: Arc<dyn LogStore>, locks: Arc<IdLocks>) -> Self {
        Self { store, locks }
    }

    /// Run one rotation pass over all active logs.
    ///
    /// Ids come straight from the log store's listing; failures are
    /// isolated per id.
    #[instrument(skip(self))]
    pub async fn rotate_all(&self) {
        let ids = match self.store.list(false).await {
            Ok(ids) => ids,
            Err(err) => {
                error!("could not list logs for rotation: {err}");
                return;
            }
        };

        debug!("rotating {} log stream(s)", ids.len());
        for id in ids {
            self.rotate(&id).await;
        }
    }

    async fn rotate(&self, log_id: &str) {
        // Same lock the writer's append runs under: truncation can never
        // race an in-flight append for this id.
        let lock = self.locks.get(log_id);
        let _guard = lock.lock().await;

        match self.store.read(log_id).await {
            Ok(content) if content.is_empty() => {
                trace!("log {log_id} is empty; nothing to rotate");
                return;
            }
            Ok(_) => {}
            Err(err) => {
                error!("could not read log {log_id} for rotation: {err}");
                return;
            }
        }

        let artifact_id = format!("{log_id}-{}", crate::util::now_millis());
        if let Err(err) = self.store.compress(log_id, &artifact_id).await {
            // Active stream untouched; retried on the next rotation tick.
            error!("compressing log {log_id} failed, deferring rotation: {err}");
            return;
        }

        match self.store.truncate(log_id).await {
            Ok(()) => debug!("rotated log {log_id} into {artifact_id}"),
            Err(err) => error!("truncating log {log_id} after rotation failed: {err}"),
        }
    }
}
