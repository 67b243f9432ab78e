//! Per-id lock registry
//!
//! Check records and log streams are both keyed by check id, so one registry
//! serializes everything that must not race on an id: the processor's
//! read-modify-write plus log append on one side, the rotator's
//! compress/truncate on the other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Lazily-populated map of one async mutex per id
///
/// The registry itself is guarded by a std mutex, held only long enough to
/// clone out the per-id lock, never across an await point. Entries are
/// never removed; the map is bounded by the number of distinct check ids.
#[derive(Default)]
pub struct IdLocks {
    inner: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl IdLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock handle for `id`, created on first use.
    pub fn get(&self, id: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut inner = self.inner.lock().expect("id lock registry poisoned");
        inner.entry(id.to_string()).or_default().clone()
    }
}
