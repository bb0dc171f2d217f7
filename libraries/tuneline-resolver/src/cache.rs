//! In-memory resolution cache
//!
//! Two independent namespaces: search results keyed by the literal query,
//! and direct stream URLs keyed by source locator. Entries live for the
//! whole process unless a TTL is configured for a namespace. Failed
//! computations are never stored.

use moka::future::Cache as MokaCache;
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use tuneline_core::{Result, SearchResultSet, TunelineError};

/// One key space of the cache
#[derive(Clone)]
pub struct Namespace<V> {
    name: &'static str,
    entries: MokaCache<String, V>,
}

impl<V> Namespace<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Unbounded namespace, entries optionally expire after `ttl`
    pub fn new(name: &'static str, ttl: Option<Duration>) -> Self {
        let mut builder = MokaCache::builder().name(name);
        if let Some(ttl) = ttl {
            builder = builder.time_to_live(ttl);
        }
        Self {
            name,
            entries: builder.build(),
        }
    }

    /// Cached value for `key`, if any
    pub async fn get(&self, key: &str) -> Option<V> {
        self.entries.get(key).await
    }

    /// Return the cached value, or run `compute` and cache its success
    ///
    /// Concurrent callers missing on the same key share a single run of
    /// `compute`. An error is handed to every waiter and nothing is stored,
    /// so the next call retries.
    pub async fn get_or_compute<F>(&self, key: &str, compute: F) -> Result<V>
    where
        F: Future<Output = Result<V>>,
    {
        if let Some(value) = self.entries.get(key).await {
            tracing::info!(namespace = self.name, "Serving {:?} from cache", key);
            return Ok(value);
        }

        let name = self.name;
        self.entries
            .try_get_with_by_ref(key, async move {
                tracing::info!(namespace = name, "Cache miss for {:?}, resolving", key);
                let value = compute.await?;
                tracing::info!(namespace = name, "Cached result for {:?}", key);
                Ok::<V, TunelineError>(value)
            })
            .await
            .map_err(|e| (*e).clone())
    }

    /// Number of live entries
    pub async fn entry_count(&self) -> u64 {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count()
    }
}

/// Process-wide cache of resolver answers
#[derive(Clone)]
pub struct ResolutionCache {
    /// Search results by query string
    pub searches: Namespace<SearchResultSet>,
    /// Direct stream URLs by source locator
    pub streams: Namespace<String>,
}

impl ResolutionCache {
    /// Cache with no expiry in either namespace
    pub fn new() -> Self {
        Self::with_stream_ttl(None)
    }

    /// Cache whose stream bindings expire after `stream_ttl`
    pub fn with_stream_ttl(stream_ttl: Option<Duration>) -> Self {
        Self {
            searches: Namespace::new("searches", None),
            streams: Namespace::new("streams", stream_ttl),
        }
    }

    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            searches_count: self.searches.entry_count().await,
            streams_count: self.streams.entry_count().await,
        }
    }
}

impl Default for ResolutionCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub searches_count: u64,
    pub streams_count: u64,
}
