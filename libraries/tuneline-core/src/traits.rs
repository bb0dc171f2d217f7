/// Core traits for Tuneline
use crate::error::Result;
use crate::types::SearchResultSet;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Media resolver trait
///
/// Boundary to the external media-indexing tool. The production
/// implementation spawns one subprocess per call; tests substitute
/// in-memory fakes.
///
/// Implementations must abandon the call (and reap any child process) once
/// `cancel` fires, returning `TunelineError::ResolverCancelled`.
#[async_trait]
pub trait MediaResolver: Send + Sync {
    /// Search for media matching a free-text query
    ///
    /// # Errors
    /// Returns a resolver failure if the tool fails, times out, or prints
    /// malformed records
    async fn search(&self, query: &str, cancel: &CancellationToken) -> Result<SearchResultSet>;

    /// Turn a source locator into a direct playable URL
    ///
    /// # Errors
    /// Returns a resolver failure, or `StreamResolutionEmpty` when the tool
    /// succeeds without printing a URL
    async fn resolve_stream(&self, source_ref: &str, cancel: &CancellationToken)
        -> Result<String>;
}
