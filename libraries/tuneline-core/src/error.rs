/// Core error types for Tuneline
use std::time::Duration;
use thiserror::Error;

/// Result type alias using `TunelineError`
pub type Result<T> = std::result::Result<T, TunelineError>;

/// Core error type for Tuneline
///
/// Every variant only carries owned strings or plain values so the error is
/// `Clone`: the resolution cache hands the same failure to every caller that
/// was waiting on one in-flight computation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TunelineError {
    /// Missing or empty required input
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The resolver binary could not be launched at all
    #[error("Failed to launch resolver: {0}")]
    ResolverSpawn(String),

    /// The resolver exited with a non-zero status (`None` when killed by a signal)
    #[error("Resolver process failed with exit code {exit_code:?}")]
    ResolverProcessFailed { exit_code: Option<i32> },

    /// The resolver did not finish within the configured bound
    #[error("Resolver timed out after {0:?}")]
    ResolverTimeout(Duration),

    /// The caller went away before the resolver finished
    #[error("Resolver invocation cancelled")]
    ResolverCancelled,

    /// The resolver produced output that is not what we expect
    #[error("Failed to parse resolver output: {0}")]
    ResultParseFailed(String),

    /// The resolver succeeded but printed no usable URL
    #[error("Resolver returned no stream URL")]
    StreamResolutionEmpty,

    /// Playlist not found
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(String),

    /// A playlist with this name already exists
    #[error("Playlist already exists: {0}")]
    PlaylistAlreadyExists(String),

    /// A user with this name already exists
    #[error("User already exists: {0}")]
    UserAlreadyExists(String),

    /// Unknown user or wrong password
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Writing a durable document failed; in-memory state may be ahead of disk
    #[error("Failed to persist {path}: {reason}")]
    PersistenceWriteFailure { path: String, reason: String },

    /// Reading a durable document failed
    #[error("Failed to load {path}: {reason}")]
    PersistenceReadFailure { path: String, reason: String },

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl TunelineError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ResultParseFailed(msg.into())
    }

    /// Create a persistence write error
    pub fn write_failure(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PersistenceWriteFailure {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a persistence read error
    pub fn read_failure(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PersistenceReadFailure {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether this failure came from the resolver pipeline (spawn, exit, parse, timeout)
    pub fn is_resolver_failure(&self) -> bool {
        matches!(
            self,
            Self::ResolverSpawn(_)
                | Self::ResolverProcessFailed { .. }
                | Self::ResolverTimeout(_)
                | Self::ResolverCancelled
                | Self::ResultParseFailed(_)
                | Self::StreamResolutionEmpty
        )
    }
}
