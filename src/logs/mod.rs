//! Append-only per-check log streams
//!
//! This module provides the log side of the worker engine: one growing
//! `.log` stream per check id, plus the compressed artifacts rotation
//! freezes them into.
//!
//! ## Lifecycle
//!
//! ```text
//! append → <id>.log (ACTIVE, growing)
//!              │ rotation tick
//!              ▼
//!          compress → <id>-<ts>.gz.b64 (ROTATED, immutable)
//!              │ only on success
//!              ▼
//!          truncate → <id>.log empty again (ACTIVE)
//! ```
//!
//! Rotated artifacts are gzip-compressed and base64-encoded, never
//! overwritten. `LogStore` is trait-shaped so tests can inject failures and
//! other backends can be swapped in.

pub mod backend;
pub mod error;
pub mod file;

pub use backend::LogStore;
pub use error::{LogError, LogResult};
pub use file::FileLogStore;
