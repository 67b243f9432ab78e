//! Error types for log stream operations

use std::fmt;

/// Result type alias for log stream operations
pub type LogResult<T> = Result<T, LogError>;

/// Errors that can occur while appending, rotating, or reading logs
#[derive(Debug)]
pub enum LogError {
    /// No active log stream exists under this id
    NotFound(String),

    /// `compress` targeted an artifact name that already exists
    ArtifactExists(String),

    /// Compressed artifact could not be decoded
    CorruptArtifact(String),

    /// I/O error (file access, etc.)
    IoError(std::io::Error),
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogError::NotFound(id) => write!(f, "no log stream {id:?}"),
            LogError::ArtifactExists(id) => {
                write!(f, "rotated artifact {id:?} already exists")
            }
            LogError::CorruptArtifact(msg) => {
                write!(f, "rotated artifact is corrupt: {msg}")
            }
            LogError::IoError(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for LogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LogError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LogError {
    fn from(err: std::io::Error) -> Self {
        LogError::IoError(err)
    }
}
