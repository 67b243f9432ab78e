//! File-backed log streams
//!
//! Active streams live at `<base>/<id>.log`; rotated artifacts at
//! `<base>/<id>-<ts>.gz.b64` (gzip, then base64 so artifacts stay greppable
//! text).

use std::io::{ErrorKind, Read, Write};
use std::path::PathBuf;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::backend::LogStore;
use super::error::{LogError, LogResult};

const ACTIVE_SUFFIX: &str = ".log";
const ROTATED_SUFFIX: &str = ".gz.b64";

/// One-file-per-stream log store
pub struct FileLogStore {
    base_dir: PathBuf,
}

impl FileLogStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn active_path(&self, log_id: &str) -> PathBuf {
        self.base_dir.join(format!("{log_id}{ACTIVE_SUFFIX}"))
    }

    fn rotated_path(&self, artifact_id: &str) -> PathBuf {
        self.base_dir.join(format!("{artifact_id}{ROTATED_SUFFIX}"))
    }

    fn map_not_found(io: std::io::Error, log_id: &str) -> LogError {
        if io.kind() == ErrorKind::NotFound {
            LogError::NotFound(log_id.to_string())
        } else {
            LogError::IoError(io)
        }
    }

    fn encode(content: &str) -> LogResult<String> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(content.as_bytes())?;
        let compressed = encoder.finish()?;
        Ok(BASE64.encode(compressed))
    }

    fn decode(encoded: &str) -> LogResult<String> {
        let compressed = BASE64
            .decode(encoded.trim())
            .map_err(|err| LogError::CorruptArtifact(err.to_string()))?;
        let mut decoder = GzDecoder::new(compressed.as_slice());
        let mut content = String::new();
        decoder
            .read_to_string(&mut content)
            .map_err(|err| LogError::CorruptArtifact(err.to_string()))?;
        Ok(content)
    }
}

#[async_trait]
impl LogStore for FileLogStore {
    async fn append(&self, log_id: &str, text: &str) -> LogResult<()> {
        fs::create_dir_all(&self.base_dir).await?;

        let mut file = fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(self.active_path(log_id))
            .await?;

        // Single buffered write per record so a failure cannot leave a
        // partial record in front of later appends.
        let mut line = String::with_capacity(text.len() + 1);
        line.push_str(text);
        line.push('\n');
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }

    async fn list(&self, include_rotated: bool) -> LogResult<Vec<String>> {
        let mut ids = vec![];

        let mut entries = match fs::read_dir(&self.base_dir).await {
            Ok(entries) => entries,
            Err(io) if io.kind() == ErrorKind::NotFound => return Ok(ids),
            Err(io) => return Err(io.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if let Some(id) = name.strip_suffix(ACTIVE_SUFFIX) {
                ids.push(id.to_string());
            } else if include_rotated {
                if let Some(id) = name.strip_suffix(ROTATED_SUFFIX) {
                    ids.push(id.to_string());
                }
            }
        }

        Ok(ids)
    }

    async fn compress(&self, source_log_id: &str, dest_artifact_id: &str) -> LogResult<()> {
        let content = self.read(source_log_id).await?;
        let encoded = Self::encode(&content)?;

        let dest = self.rotated_path(dest_artifact_id);
        debug!("writing rotated artifact {}", dest.display());

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&dest)
            .await
            .map_err(|io| {
                if io.kind() == ErrorKind::AlreadyExists {
                    LogError::ArtifactExists(dest_artifact_id.to_string())
                } else {
                    LogError::IoError(io)
                }
            })?;
        file.write_all(encoded.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }

    async fn truncate(&self, log_id: &str) -> LogResult<()> {
        let path = self.active_path(log_id);
        let file = fs::OpenOptions::new()
            .write(true)
            .open(&path)
            .await
            .map_err(|io| Self::map_not_found(io, log_id))?;
        file.set_len(0).await?;
        Ok(())
    }

    async fn read(&self, log_id: &str) -> LogResult<String> {
        fs::read_to_string(self.active_path(log_id))
            .await
            .map_err(|io| Self::map_not_found(io, log_id))
    }

    async fn read_rotated(&self, artifact_id: &str) -> LogResult<String> {
        let encoded = fs::read_to_string(self.rotated_path(artifact_id))
            .await
            .map_err(|io| Self::map_not_found(io, artifact_id))?;
        Self::decode(&encoded)
    }
}
