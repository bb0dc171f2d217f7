/// Playlist domain type
use crate::types::{Track, TrackId};
use serde::{Deserialize, Serialize};

/// Name of the playlist that always exists
pub const DEFAULT_PLAYLIST_NAME: &str = "Default Playlist";

/// Ordered, id-unique sequence of tracks
///
/// Insertion order is playback order. Serializes as a bare JSON array so the
/// playlist document maps each name straight to its tracks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    /// Create an empty playlist
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracks in playback order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Whether a track with this id is present
    pub fn contains(&self, id: &TrackId) -> bool {
        self.tracks.iter().any(|t| &t.id == id)
    }

    /// Append a track unless one with the same id is already present
    ///
    /// Returns `true` when the playlist changed.
    pub fn append(&mut self, track: Track) -> bool {
        if self.contains(&track.id) {
            return false;
        }
        self.tracks.push(track);
        true
    }

    /// Drop every track with this id
    ///
    /// Returns `true` when the playlist got shorter.
    pub fn remove(&mut self, id: &TrackId) -> bool {
        let before = self.tracks.len();
        self.tracks.retain(|t| &t.id != id);
        self.tracks.len() < before
    }

    /// Remove all tracks
    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    /// Rebuild the playlist from a complete id sequence
    ///
    /// Unknown ids are skipped, tracks whose id is not listed are dropped.
    /// A listed id that repeats only takes its track once.
    pub fn reorder(&mut self, ordered_ids: &[TrackId]) {
        let mut remaining = std::mem::take(&mut self.tracks);
        let mut reordered = Vec::with_capacity(remaining.len());

        for id in ordered_ids {
            if let Some(pos) = remaining.iter().position(|t| &t.id == id) {
                reordered.push(remaining.remove(pos));
            }
        }

        self.tracks = reordered;
    }
}

impl From<Vec<Track>> for Playlist {
    fn from(tracks: Vec<Track>) -> Self {
        let mut playlist = Self::new();
        for track in tracks {
            playlist.append(track);
        }
        playlist
    }
}
