//! Log stream trait definition

use async_trait::async_trait;

use super::error::LogResult;

/// Trait for append-only per-id log streams with a rotate lifecycle
///
/// ## Semantics
///
/// - `append` creates the stream on first use; each call is all-or-nothing
///   for the appended text
/// - `compress` freezes a stream's current content into an immutable
///   artifact and fails with `LogError::ArtifactExists` rather than
///   overwrite
/// - `truncate` resets a stream to empty without removing it
///
/// Callers are responsible for ordering: truncation must only follow a
/// successful `compress` for the same stream, and appends must not race a
/// rotation of the same id.
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Append one line of text (a record separator is added) to the stream
    /// named `log_id`, creating it if absent.
    async fn append(&self, log_id: &str, text: &str) -> LogResult<()>;

    /// List stream ids, optionally including rotated artifact ids.
    async fn list(&self, include_rotated: bool) -> LogResult<Vec<String>>;

    /// Compress the current content of `source_log_id` into a new artifact
    /// named `dest_artifact_id`. Fails if the destination already exists;
    /// the source is left untouched in every case.
    async fn compress(&self, source_log_id: &str, dest_artifact_id: &str) -> LogResult<()>;

    /// Reset the active stream `log_id` to empty.
    async fn truncate(&self, log_id: &str) -> LogResult<()>;

    /// Current content of the active stream.
    async fn read(&self, log_id: &str) -> LogResult<String>;

    /// Decompressed content of a rotated artifact.
    async fn read_rotated(&self, artifact_id: &str) -> LogResult<String>;
}
