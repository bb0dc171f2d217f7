//! Playlist store
//!
//! Named, ordered, id-unique track lists persisted as one JSON document that
//! maps each playlist name to its track array. Name order in the document is
//! creation order.

use crate::persist::{read_document, write_document};
use indexmap::IndexMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tuneline_core::{Playlist, Result, Track, TrackId, TunelineError, DEFAULT_PLAYLIST_NAME};

type PlaylistMap = IndexMap<String, Playlist>;

/// Sole owner of every playlist and of the playlist document
///
/// A single lock guards the whole map. Each mutation and the file rewrite
/// that follows it happen under that lock, so the document on disk always
/// reflects mutations in the order they were applied. If the rewrite fails
/// the in-memory change is rolled back.
///
/// Mutations run on their own task. A caller that stops waiting (a client
/// disconnecting mid-request) does not interrupt the write, so memory and
/// disk never drift apart.
pub struct PlaylistStore {
    path: PathBuf,
    playlists: Arc<Mutex<PlaylistMap>>,
}

impl PlaylistStore {
    /// Load the playlist document, creating the default playlist if needed
    ///
    /// A missing file starts an empty store. The default playlist is
    /// persisted immediately when it had to be created.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut playlists: PlaylistMap = read_document(&path).await?.unwrap_or_default();

        tracing::info!(
            "Loaded {} playlist(s) from {}",
            playlists.len(),
            path.display()
        );

        if !playlists.contains_key(DEFAULT_PLAYLIST_NAME) {
            playlists.insert(DEFAULT_PLAYLIST_NAME.to_string(), Playlist::new());
            write_document(&path, &playlists).await?;
            tracing::info!("Created '{}'", DEFAULT_PLAYLIST_NAME);
        }

        Ok(Self {
            path,
            playlists: Arc::new(Mutex::new(playlists)),
        })
    }

    /// All playlist names in creation order
    pub async fn list_names(&self) -> Vec<String> {
        self.playlists.lock().await.keys().cloned().collect()
    }

    /// Create an empty playlist
    ///
    /// # Errors
    /// `Validation` for a blank name, `PlaylistAlreadyExists` if taken.
    pub async fn create(&self, name: &str) -> Result<Vec<Track>> {
        if name.trim().is_empty() {
            return Err(TunelineError::validation("Playlist name is required"));
        }

        let playlists = Arc::clone(&self.playlists);
        let path = self.path.clone();
        let name = name.to_string();

        self.detached(tokio::spawn(async move {
            let mut playlists = playlists.lock().await;
            if playlists.contains_key(&name) {
                return Err(TunelineError::PlaylistAlreadyExists(name));
            }

            playlists.insert(name.clone(), Playlist::new());
            if let Err(e) = write_document(&path, &*playlists).await {
                playlists.shift_remove(&name);
                tracing::error!("Failed to persist new playlist '{}': {}", name, e);
                return Err(e.into());
            }

            tracing::info!("Created playlist '{}'", name);
            Ok(Vec::new())
        }))
        .await
    }

    /// Tracks of the named playlist
    pub async fn get(&self, name: &str) -> Result<Vec<Track>> {
        self.playlists
            .lock()
            .await
            .get(name)
            .map(|p| p.tracks().to_vec())
            .ok_or_else(|| TunelineError::PlaylistNotFound(name.to_string()))
    }

    /// Tracks of the named playlist, or of the default playlist when no name is given
    pub async fn get_or_default(&self, name: Option<&str>) -> Result<Vec<Track>> {
        let name = name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(DEFAULT_PLAYLIST_NAME);
        self.get(name).await
    }

    /// Append a track unless its id is already present
    ///
    /// A duplicate returns the playlist unchanged and does not touch the
    /// document.
    pub async fn append(&self, name: &str, track: Track) -> Result<Vec<Track>> {
        track.validate()?;
        self.mutate(name, "append", move |playlist| playlist.append(track))
            .await
    }

    /// Remove every track with this id, persisting only if one was removed
    pub async fn remove(&self, name: &str, id: &TrackId) -> Result<Vec<Track>> {
        let id = id.clone();
        self.mutate(name, "remove", move |playlist| playlist.remove(&id))
            .await
    }

    /// Empty the playlist; always persists
    pub async fn clear(&self, name: &str) -> Result<Vec<Track>> {
        self.mutate(name, "clear", |playlist| {
            playlist.clear();
            true
        })
        .await
    }

    /// Replace the playlist with the tracks named by `ordered_ids`, in that order
    ///
    /// Unknown ids are skipped and tracks missing from `ordered_ids` are
    /// dropped. Always persists.
    pub async fn reorder(&self, name: &str, ordered_ids: &[TrackId]) -> Result<Vec<Track>> {
        let ordered_ids = ordered_ids.to_vec();
        self.mutate(name, "reorder", move |playlist| {
            playlist.reorder(&ordered_ids);
            true
        })
        .await
    }

    /// Apply `change` to one playlist and persist when it reports a change
    async fn mutate<F>(&self, name: &str, op: &'static str, change: F) -> Result<Vec<Track>>
    where
        F: FnOnce(&mut Playlist) -> bool + Send + 'static,
    {
        let playlists = Arc::clone(&self.playlists);
        let path = self.path.clone();
        let name = name.to_string();

        self.detached(tokio::spawn(async move {
            let mut playlists = playlists.lock().await;
            let Some(playlist) = playlists.get_mut(&name) else {
                return Err(TunelineError::PlaylistNotFound(name));
            };

            let previous = playlist.clone();
            if !change(playlist) {
                tracing::debug!(op, "Playlist '{}' unchanged, not persisting", name);
                return Ok(playlist.tracks().to_vec());
            }
            let tracks = playlist.tracks().to_vec();

            if let Err(e) = write_document(&path, &*playlists).await {
                if let Some(playlist) = playlists.get_mut(&name) {
                    *playlist = previous;
                }
                tracing::error!(op, "Failed to persist playlist '{}': {}", name, e);
                return Err(e.into());
            }

            tracing::info!(op, "Playlist '{}' now has {} track(s)", name, tracks.len());
            Ok(tracks)
        }))
        .await
    }

    /// Wait for a spawned mutation
    async fn detached<T>(&self, task: JoinHandle<Result<T>>) -> Result<T> {
        task.await.map_err(|e| {
            tracing::error!("Playlist mutation task failed: {}", e);
            TunelineError::write_failure(self.path.display().to_string(), e.to_string())
        })?
    }
}
