/// Track domain type
use crate::error::{Result, TunelineError};
use crate::types::TrackId;
use serde::{Deserialize, Serialize};

/// Ordered tracks produced by one search query
pub type SearchResultSet = Vec<Track>;

/// One playable media item
///
/// Serialized in camelCase because the same shape travels to clients and
/// into the playlist document. Every field except `id` defaults when absent
/// so that clients may post partial records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Stable identifier from the resolver
    pub id: TrackId,

    /// Locator the resolver can turn into a direct stream URL
    #[serde(default)]
    pub source_ref: String,

    /// Display title
    #[serde(default)]
    pub title: String,

    /// Duration rendered as `HH:MM:SS`
    #[serde(default = "default_duration")]
    pub duration_formatted: String,

    /// Uploader / channel attribution
    #[serde(default)]
    pub channel_name: String,

    /// Remote thumbnail image, if the resolver offered any
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

fn default_duration() -> String {
    "00:00:00".to_string()
}

impl Track {
    /// Create a track with minimal metadata
    pub fn new(id: TrackId, source_ref: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id,
            source_ref: source_ref.into(),
            title: title.into(),
            duration_formatted: default_duration(),
            channel_name: String::new(),
            thumbnail_url: None,
        }
    }

    /// Check the record is usable for playlist operations
    ///
    /// # Errors
    /// Returns `Validation` when the id is empty
    pub fn validate(&self) -> Result<()> {
        if self.id.is_blank() {
            return Err(TunelineError::validation("Track id is required"));
        }
        Ok(())
    }
}
