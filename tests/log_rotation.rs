//! Integration tests for the log rotation lifecycle
//!
//! These tests verify:
//! - rotation freezes content into a timestamped artifact and empties the
//!   active stream
//! - truncation never happens when compression fails
//! - concatenating rotated artifacts plus the active stream reconstructs
//!   the full history

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use tempfile::tempdir;
use upwatch::logs::{FileLogStore, LogError, LogResult, LogStore};
use upwatch::worker::locks::IdLocks;
use upwatch::worker::rotator::LogRotator;

fn rotator_for(store: Arc<dyn LogStore>) -> LogRotator {
    LogRotator::new(store, Arc::new(IdLocks::new()))
}

/// Rotated artifact ids for `log_id`, in rotation order.
async fn artifacts_of(store: &FileLogStore, log_id: &str) -> Vec<String> {
    let mut artifacts: Vec<String> = store
        .list(true)
        .await
        .unwrap()
        .into_iter()
        .filter(|id| id.starts_with(&format!("{log_id}-")))
        .collect();
    // Artifact names end in the rotation timestamp, so the lexicographic
    // order of equal-length suffixes is rotation order.
    artifacts.sort();
    artifacts
}

#[tokio::test]
async fn rotation_freezes_content_and_empties_the_active_log() {
    let dir = tempdir().unwrap();
    let store = Arc::new(FileLogStore::new(dir.path()));

    store.append("chk123", r#"{"n":1}"#).await.unwrap();
    store.append("chk123", r#"{"n":2}"#).await.unwrap();
    let before = store.read("chk123").await.unwrap();

    rotator_for(store.clone()).rotate_all().await;

    let artifacts = artifacts_of(&store, "chk123").await;
    assert_eq!(artifacts.len(), 1);

    // The frozen artifact holds exactly the pre-rotation bytes and the
    // active stream is empty but still appendable.
    assert_eq!(store.read_rotated(&artifacts[0]).await.unwrap(), before);
    assert_eq!(store.read("chk123").await.unwrap(), "");

    store.append("chk123", r#"{"n":3}"#).await.unwrap();
    assert_eq!(store.read("chk123").await.unwrap(), "{\"n\":3}\n");
}

#[tokio::test]
async fn empty_active_logs_are_not_rotated() {
    let dir = tempdir().unwrap();
    let store = Arc::new(FileLogStore::new(dir.path()));

    store.append("chk123", "only record").await.unwrap();
    store.truncate("chk123").await.unwrap();

    rotator_for(store.clone()).rotate_all().await;

    assert!(artifacts_of(&store, "chk123").await.is_empty());
}

/// Log store whose compression always fails, leaving everything else real.
struct BrokenCompressStore {
    inner: FileLogStore,
}

#[async_trait]
impl LogStore for BrokenCompressStore {
    async fn append(&self, log_id: &str, text: &str) -> LogResult<()> {
        self.inner.append(log_id, text).await
    }

    async fn list(&self, include_rotated: bool) -> LogResult<Vec<String>> {
        self.inner.list(include_rotated).await
    }

    async fn compress(&self, _source: &str, _dest: &str) -> LogResult<()> {
        Err(LogError::IoError(std::io::Error::other("gzip exploded")))
    }

    async fn truncate(&self, log_id: &str) -> LogResult<()> {
        self.inner.truncate(log_id).await
    }

    async fn read(&self, log_id: &str) -> LogResult<String> {
        self.inner.read(log_id).await
    }

    async fn read_rotated(&self, artifact_id: &str) -> LogResult<String> {
        self.inner.read_rotated(artifact_id).await
    }
}

#[tokio::test]
async fn failed_compression_never_truncates_the_active_log() {
    let dir = tempdir().unwrap();
    let store = Arc::new(BrokenCompressStore {
        inner: FileLogStore::new(dir.path()),
    });

    store.append("chk123", "precious record").await.unwrap();

    rotator_for(store.clone()).rotate_all().await;

    // No artifact, no truncation, no data loss.
    assert_eq!(store.list(true).await.unwrap(), vec!["chk123"]);
    assert_eq!(store.read("chk123").await.unwrap(), "precious record\n");
}

#[tokio::test]
async fn rotated_history_reconstructs_without_gaps() {
    let dir = tempdir().unwrap();
    let store = Arc::new(FileLogStore::new(dir.path()));
    let rotator = rotator_for(store.clone());

    store.append("chk123", "r1").await.unwrap();
    store.append("chk123", "r2").await.unwrap();
    rotator.rotate_all().await;

    // Distinct rotation timestamps for distinct artifacts.
    tokio::time::sleep(Duration::from_millis(5)).await;

    store.append("chk123", "r3").await.unwrap();
    rotator.rotate_all().await;

    store.append("chk123", "r4").await.unwrap();

    let mut history = String::new();
    for artifact in artifacts_of(&store, "chk123").await {
        history.push_str(&store.read_rotated(&artifact).await.unwrap());
    }
    history.push_str(&store.read("chk123").await.unwrap());

    assert_eq!(history, "r1\nr2\nr3\nr4\n");
}
