/// Storage-specific errors
use std::path::PathBuf;
use thiserror::Error;
use tuneline_core::TunelineError;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading a document from disk failed
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing or renaming a document failed
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document on disk is not valid JSON of the expected shape
    #[error("Malformed document {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The in-memory state could not be serialized
    #[error("Failed to serialize {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<StorageError> for TunelineError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Read { path, source } => {
                TunelineError::read_failure(path.display().to_string(), source.to_string())
            }
            StorageError::Malformed { path, source } => {
                TunelineError::read_failure(path.display().to_string(), source.to_string())
            }
            StorageError::Write { path, source } => {
                TunelineError::write_failure(path.display().to_string(), source.to_string())
            }
            StorageError::Serialize { path, source } => {
                TunelineError::write_failure(path.display().to_string(), source.to_string())
            }
        }
    }
}
