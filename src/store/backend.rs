//! Store trait definition
//!
//! This module defines the `DataStore` trait that all persistence
//! implementations must implement.

use async_trait::async_trait;
use serde_json::Value;

use super::error::StoreResult;

/// Trait for (collection, id) keyed record stores
///
/// ## Semantics
///
/// - `create` fails with `StoreError::AlreadyExists` if the id is taken
/// - `read` and `update` fail with `StoreError::NotFound` for unknown ids
/// - `list` returns ids in no particular order
///
/// ## Thread Safety
///
/// Implementations must be `Send + Sync`; the worker shares one store across
/// concurrently executing check pipelines. Per-key updates are plain
/// read-then-overwrite, not compare-and-swap; callers that may race on the
/// same id must serialize themselves.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Insert a new record, failing if the id already exists.
    async fn create(&self, collection: &str, id: &str, value: &Value) -> StoreResult<()>;

    /// Read the record stored under (collection, id).
    async fn read(&self, collection: &str, id: &str) -> StoreResult<Value>;

    /// Overwrite an existing record, failing if the id does not exist.
    async fn update(&self, collection: &str, id: &str, value: &Value) -> StoreResult<()>;

    /// Remove the record stored under (collection, id).
    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()>;

    /// List all ids in a collection (unordered).
    async fn list(&self, collection: &str) -> StoreResult<Vec<String>>;
}
