/// Stream binding domain type
use serde::{Deserialize, Serialize};

/// A source locator bound to the direct stream URL the resolver produced for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamBinding {
    /// Locator the client asked to play
    pub source_ref: String,

    /// Direct playable URL
    pub stream_url: String,
}

impl StreamBinding {
    pub fn new(source_ref: impl Into<String>, stream_url: impl Into<String>) -> Self {
        Self {
            source_ref: source_ref.into(),
            stream_url: stream_url.into(),
        }
    }
}
