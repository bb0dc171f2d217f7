/// ID types for Tuneline entities
use serde::{Deserialize, Serialize};
use std::fmt;

/// Track identifier
///
/// Opaque identifier handed out by the resolver. It is the dedup and removal
/// key inside a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    /// Create a new track ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is empty (or only whitespace)
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_id_serializes_as_plain_string() {
        let id = TrackId::new("abc123");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc123\"");
        assert_eq!(id.to_string(), "abc123");
    }

    #[test]
    fn blank_ids() {
        assert!(TrackId::new("").is_blank());
        assert!(TrackId::new("   ").is_blank());
        assert!(!TrackId::new("x").is_blank());
    }
}
