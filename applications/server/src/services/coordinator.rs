//! Request coordinator
//!
//! Composes the resolver, the resolution cache and the playlist store for
//! the HTTP layer. Search and play consult the cache first and only drive
//! the resolver on a miss. Concurrent misses for the same key share one
//! resolver run.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tuneline_core::{
    MediaResolver, Result, SearchResultSet, StreamBinding, Track, TunelineError,
};
use tuneline_resolver::{CacheStats, ResolutionCache};
use tuneline_storage::PlaylistStore;

#[derive(Clone)]
pub struct RequestCoordinator {
    resolver: Arc<dyn MediaResolver>,
    cache: ResolutionCache,
    playlists: Arc<PlaylistStore>,
}

impl RequestCoordinator {
    pub fn new(
        resolver: Arc<dyn MediaResolver>,
        cache: ResolutionCache,
        playlists: Arc<PlaylistStore>,
    ) -> Self {
        Self {
            resolver,
            cache,
            playlists,
        }
    }

    pub fn playlists(&self) -> &PlaylistStore {
        &self.playlists
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    /// Search results for `query`, resolved at most once per process
    ///
    /// # Errors
    /// `Validation` for a blank query (no resolver call), otherwise whatever
    /// the resolver pipeline reports.
    pub async fn search(&self, query: &str) -> Result<SearchResultSet> {
        if query.trim().is_empty() {
            return Err(TunelineError::validation("Search query is required"));
        }

        // Fires when this request future is dropped, e.g. on client disconnect
        let cancel = CancellationToken::new();
        let _guard = cancel.clone().drop_guard();

        self.cache
            .searches
            .get_or_compute(query, self.resolver.search(query, &cancel))
            .await
    }

    /// Direct stream location for `source_ref`
    ///
    /// The HTTP layer redirects to the returned URL; media bytes never pass
    /// through the server.
    pub async fn play(&self, source_ref: &str) -> Result<StreamBinding> {
        if source_ref.trim().is_empty() {
            return Err(TunelineError::validation("Source locator is required"));
        }

        let cancel = CancellationToken::new();
        let _guard = cancel.clone().drop_guard();

        let stream_url = self
            .cache
            .streams
            .get_or_compute(source_ref, self.resolver.resolve_stream(source_ref, &cancel))
            .await?;

        Ok(StreamBinding::new(source_ref, stream_url))
    }

    /// Append `track` to `playlist`, then play it
    ///
    /// The two steps are independent: a failed play leaves the append in
    /// place.
    pub async fn select_and_play(&self, playlist: &str, track: Track) -> Result<StreamBinding> {
        let source_ref = if track.source_ref.trim().is_empty() {
            track.id.as_str().to_string()
        } else {
            track.source_ref.clone()
        };

        self.playlists.append(playlist, track).await?;
        self.play(&source_ref).await
    }
}
