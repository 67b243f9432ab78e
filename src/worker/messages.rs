//! Command messages for the scan scheduler
//!
//! The scheduler actor owns both periodic tickers; these commands let the
//! bootstrap and tests drive ticks on demand and shut the worker down.

use tokio::sync::oneshot;

/// Commands that can be sent to the scan scheduler
#[derive(Debug)]
pub enum WorkerCommand {
    /// Run one scan pass immediately (bypassing the interval timer)
    ///
    /// Used by tests and manual triggers; responds once every check
    /// pipeline of the pass has finished.
    ScanNow { respond_to: oneshot::Sender<()> },

    /// Run one rotation pass immediately
    RotateNow { respond_to: oneshot::Sender<()> },

    /// Gracefully shut down the worker
    ///
    /// In-flight pipelines of the current tick complete; no further ticks
    /// fire.
    Shutdown,
}
