//! Uptime-check worker engine
//!
//! This module ties the ports together into the periodic check pipeline.
//! The scheduler runs as a single async task; every scan tick fans out one
//! independent pipeline task per stored check.
//!
//! ## Pipeline Flow
//!
//! ```text
//! scan tick ──► list checks ──► (per check, concurrently)
//!                                  read ─► validate ─► probe ─► process
//!                                                                  │
//!                          ┌───────────────────────┬───────────────┤
//!                          ▼                       ▼               ▼
//!                     log append            persist update   sms alert
//!                  (unconditional)         (state change)  (on transition)
//!
//! rotation tick ──► per log id: compress ─► truncate
//! ```
//!
//! ## Failure Isolation
//!
//! No failure in one check's pipeline may interrupt another check or the
//! scheduler's next tick. Probe errors and timeouts are legitimate outcomes
//! (the check is down); store, log, and gateway failures are logged and
//! dropped: the next tick re-reads everything from the store.
//!
//! ## Per-Id Serialization
//!
//! Pipelines share no mutable state except the ports. Operations touching
//! one check's record or log stream (read-modify-write update, log append,
//! compress/truncate) run under that id's lock from [`locks::IdLocks`], so
//! overlapping work on the same id cannot lose updates or truncate away an
//! in-flight append.

pub mod alerter;
pub mod locks;
pub mod messages;
pub mod prober;
pub mod processor;
pub mod rotator;
pub mod scheduler;
pub mod writer;

pub use scheduler::WorkerHandle;
