//! Key-value persistence for worker state
//!
//! This module provides a trait-based abstraction over the (collection, id)
//! key-value store the worker engine reads checks from and writes them back
//! to.
//!
//! ## Design
//!
//! - **Trait-based**: `DataStore` allows swapping implementations
//! - **Async**: all operations are async for compatibility with Tokio
//! - **Value-oriented**: records are `serde_json::Value`s so the trait stays
//!   object-safe; callers (de)serialize their own types at the boundary
//!
//! ## Backends
//!
//! - **File** (default): one JSON file per (collection, id)
//! - **In-Memory**: no persistence, for tests

pub mod backend;
pub mod error;
pub mod file;
pub mod memory;

pub use backend::DataStore;
pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;

/// Collection holding check definitions.
pub const CHECKS: &str = "checks";
