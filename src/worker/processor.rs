//! Outcome processor
//!
//! Classifies a probe outcome, writes the audit record, persists the
//! updated check, and triggers the debounced alert.
//!
//! ## Classification
//!
//! ```text
//! state = up    iff outcome has no error AND response code ∈ success codes
//! alert needed  iff the check has been probed before AND its state changed
//! ```
//!
//! A check probed for the first time never alerts, since there is no prior
//! state to have changed from.

use std::sync::Arc;

use tracing::{debug, error, instrument};

use crate::store::{CHECKS, DataStore};
use crate::worker::alerter::AlertDispatcher;
use crate::worker::locks::IdLocks;
use crate::worker::writer::LogWriter;
use crate::{Check, CheckState, LogRecord, ProbeOutcome};

/// Classify a probe outcome against the check's success codes.
pub fn classify(check: &Check, outcome: &ProbeOutcome) -> CheckState {
    match (&outcome.error, outcome.response_code) {
        (None, Some(code)) if check.success_codes.contains(&code) => CheckState::Up,
        _ => CheckState::Down,
    }
}

/// Whether this outcome warrants a status-change alert.
pub fn alert_needed(check: &Check, new_state: CheckState) -> bool {
    check.last_checked.is_some() && check.state != new_state
}

/// Processor applying one probe outcome to one check
pub struct OutcomeProcessor {
    store: Arc<dyn DataStore>,
    writer: LogWriter,
    dispatcher: AlertDispatcher,
    locks: Arc<IdLocks>,
}

impl OutcomeProcessor {
    pub fn new(
        store: Arc<dyn DataStore>,
        writer: LogWriter,
        dispatcher: AlertDispatcher,
        locks: Arc<IdLocks>,
    ) -> Self {
        Self {
            store,
            writer,
            dispatcher,
            locks,
        }
    }

    /// Process one outcome: audit, persist, alert.
    ///
    /// Runs under the check id's lock so overlapping pipelines for the same
    /// check cannot interleave their read-modify-write or race the rotator
    /// on the log stream. Every failure is logged and contained here; the
    /// next tick re-reads the check from the store.
    #[instrument(skip_all, fields(check = %check.id))]
    pub async fn process(&self, check: Check, outcome: ProbeOutcome) {
        let lock = self.locks.get(&check.id);
        let _guard = lock.lock().await;

        let state = classify(&check, &outcome);
        let alert = alert_needed(&check, state);
        let time = crate::util::now_millis();

        // The audit record is written unconditionally, state change or not.
        let record = LogRecord {
            check: check.clone(),
            outcome,
            state,
            alert,
            time,
        };
        self.writer.write(&record).await;

        let mut updated = check;
        updated.state = state;
        updated.last_checked = Some(time);

        match serde_json::to_value(&updated) {
            Ok(value) => {
                if let Err(err) = self.store.update(CHECKS, &updated.id, &value).await {
                    // Not retried; the alert below still goes out so a real
                    // state change is not silently lost.
                    error!("persisting check update failed: {err}");
                }
            }
            Err(err) => error!("could not serialize updated check: {err}"),
        }

        if alert {
            self.dispatcher.dispatch(&updated).await;
        } else {
            debug!("check state {state} unchanged or first run; no alert");
        }
    }
}
