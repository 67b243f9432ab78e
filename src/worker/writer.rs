//! Log writer
//!
//! Serializes one [`LogRecord`] per probe to a JSON line and appends it to
//! the log stream named after the check id. Append failures are logged and
//! dropped; the audit trail is best-effort, the pipeline continues.

use std::sync::Arc;

use tracing::{debug, error};

use crate::LogRecord;
use crate::logs::LogStore;

/// Writer appending audit records to per-check log streams
///
/// Callers must hold the check id's lock; the writer itself does not
/// synchronize against rotation.
#[derive(Clone)]
pub struct LogWriter {
    store: Arc<dyn LogStore>,
}

impl LogWriter {
    pub fn new(store: Arc<dyn LogStore>) -> Self {
        Self { store }
    }

    pub async fn write(&self, record: &LogRecord) {
        let line = match serde_json::to_string(record) {
            Ok(line) => line,
            Err(err) => {
                error!("could not serialize audit record: {err}");
                return;
            }
        };

        match self.store.append(&record.check.id, &line).await {
            Ok(()) => debug!("appended audit record for check {}", record.check.id),
            Err(err) => error!(
                "appending audit record for check {} failed: {err}",
                record.check.id
            ),
        }
    }
}
