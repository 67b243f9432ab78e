//! Scan scheduler
//!
//! The scheduler is the worker's only long-lived task. It owns two interval
//! tickers (scan and rotation) and a command channel, multiplexed through
//! one `tokio::select!` loop in the same shape as the other actors in this
//! codebase.
//!
//! On every scan tick it lists all stored checks and fans out one spawned
//! pipeline task per check: read, validate, probe, process. Pipelines are
//! independent; a malformed check or a failing pipeline is logged and never
//! affects its siblings or the next tick. Both tickers fire once
//! immediately at startup, so a freshly started worker scans and rotates
//! without waiting a full interval.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use futures::future::join_all;
use tokio::sync::{mpsc, oneshot};
use tokio::time::interval;
use tracing::{debug, error, instrument, trace, warn};

use crate::Check;
use crate::config::Config;
use crate::logs::LogStore;
use crate::sms::SmsGateway;
use crate::store::{CHECKS, DataStore};
use crate::worker::alerter::AlertDispatcher;
use crate::worker::locks::IdLocks;
use crate::worker::messages::WorkerCommand;
use crate::worker::prober::Prober;
use crate::worker::processor::OutcomeProcessor;
use crate::worker::rotator::LogRotator;
use crate::worker::writer::LogWriter;

/// Actor driving the scan and rotation ticks
pub struct ScanScheduler {
    store: Arc<dyn DataStore>,
    prober: Arc<Prober>,
    processor: Arc<OutcomeProcessor>,
    rotator: LogRotator,
    command_rx: mpsc::Receiver<WorkerCommand>,
    scan_interval: Duration,
    rotation_interval: Duration,
}

impl ScanScheduler {
    /// Run the scheduler's main loop until shutdown.
    #[instrument(skip(self))]
    pub async fn run(mut self) {
        debug!(
            "starting scan scheduler (scan every {:?}, rotate every {:?})",
            self.scan_interval, self.rotation_interval
        );

        let mut scan_ticker = interval(self.scan_interval);
        let mut rotation_ticker = interval(self.rotation_interval);

        loop {
            tokio::select! {
                _ = scan_ticker.tick() => {
                    self.scan_tick().await;
                }

                _ = rotation_ticker.tick() => {
                    self.rotator.rotate_all().await;
                }

                Some(cmd) = self.command_rx.recv() => {
                    match cmd {
                        WorkerCommand::ScanNow { respond_to } => {
                            debug!("received ScanNow command");
                            self.scan_tick().await;
                            let _ = respond_to.send(());
                        }

                        WorkerCommand::RotateNow { respond_to } => {
                            debug!("received RotateNow command");
                            self.rotator.rotate_all().await;
                            let _ = respond_to.send(());
                        }

                        WorkerCommand::Shutdown => {
                            debug!("received shutdown command");
                            break;
                        }
                    }
                }

                else => {
                    warn!("command channel closed, shutting down");
                    break;
                }
            }
        }

        debug!("scan scheduler stopped");
    }

    /// Run one scan pass: fan out a pipeline per stored check and wait for
    /// all of them.
    async fn scan_tick(&self) {
        trace!("scan tick");

        let ids = match self.store.list(CHECKS).await {
            Ok(ids) => ids,
            Err(err) => {
                error!("could not list checks: {err}");
                return;
            }
        };

        if ids.is_empty() {
            debug!("no checks to process");
            return;
        }

        let pipelines = ids.into_iter().map(|id| {
            let store = self.store.clone();
            let prober = self.prober.clone();
            let processor = self.processor.clone();
            tokio::spawn(async move {
                run_pipeline(store, prober, processor, id).await;
            })
        });

        for result in join_all(pipelines).await {
            if let Err(err) = result {
                // A panicked pipeline must not take the tick down with it.
                error!("check pipeline aborted: {err}");
            }
        }
    }
}

/// One check's pipeline for one tick: read, validate, probe, process.
async fn run_pipeline(
    store: Arc<dyn DataStore>,
    prober: Arc<Prober>,
    processor: Arc<OutcomeProcessor>,
    id: String,
) {
    let value = match store.read(CHECKS, &id).await {
        Ok(value) => value,
        Err(err) => {
            error!("could not read check {id}: {err}");
            return;
        }
    };

    let check: Check = match serde_json::from_value(value) {
        Ok(check) => check,
        Err(err) => {
            warn!("stored check {id} is malformed and will be skipped: {err}");
            return;
        }
    };

    if let Err(err) = check.validate() {
        warn!("check {id} failed validation and will be skipped: {err}");
        return;
    }

    let outcome = prober.probe(&check).await;
    processor.process(check, outcome).await;
}

/// Handle for a running worker
///
/// Spawning the handle starts the scheduler with both tickers armed; the
/// first scan and rotation pass run immediately.
#[derive(Clone)]
pub struct WorkerHandle {
    sender: mpsc::Sender<WorkerCommand>,
}

impl WorkerHandle {
    /// Wire the ports together and spawn the scheduler actor.
    pub fn spawn(
        store: Arc<dyn DataStore>,
        log_store: Arc<dyn LogStore>,
        gateway: Arc<dyn SmsGateway>,
        config: &Config,
    ) -> Self {
        let locks = Arc::new(IdLocks::new());

        let writer = LogWriter::new(log_store.clone());
        let dispatcher = AlertDispatcher::new(gateway);
        let processor = Arc::new(OutcomeProcessor::new(
            store.clone(),
            writer,
            dispatcher,
            locks.clone(),
        ));
        let rotator = LogRotator::new(log_store, locks);

        let (cmd_tx, cmd_rx) = mpsc::channel(32);

        let scheduler = ScanScheduler {
            store,
            prober: Arc::new(Prober::new()),
            processor,
            rotator,
            command_rx: cmd_rx,
            scan_interval: Duration::from_secs(config.scan_interval_secs),
            rotation_interval: Duration::from_secs(config.rotation_interval_secs),
        };

        tokio::spawn(scheduler.run());

        Self { sender: cmd_tx }
    }

    /// Trigger one scan pass and wait for it to finish.
    pub async fn scan_now(&self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(WorkerCommand::ScanNow { respond_to: tx })
            .await?;
        rx.await?;
        Ok(())
    }

    /// Trigger one rotation pass and wait for it to finish.
    pub async fn rotate_now(&self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(WorkerCommand::RotateNow { respond_to: tx })
            .await?;
        rx.await?;
        Ok(())
    }

    /// Shut the worker down.
    pub async fn shutdown(self) {
        let _ = self.sender.send(WorkerCommand::Shutdown).await;
    }
}
