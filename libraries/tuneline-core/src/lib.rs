//! Tuneline Core
//!
//! Domain types, the resolver seam, and error handling shared by every
//! Tuneline crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Playlist`, `StreamBinding`, `UserRecord`
//! - **Core Traits**: `MediaResolver`, the boundary to the external resolver tool
//! - **Error Handling**: Unified `TunelineError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use tuneline_core::types::{Playlist, Track, TrackId};
//!
//! let track = Track::new(TrackId::new("dQw4w9WgXcQ"), "https://youtu.be/dQw4w9WgXcQ", "Song");
//!
//! let mut playlist = Playlist::new();
//! assert!(playlist.append(track.clone()));
//! assert!(!playlist.append(track));
//! assert_eq!(playlist.len(), 1);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{Result, TunelineError};
pub use traits::MediaResolver;

pub use types::{
    Playlist, SearchResultSet, StreamBinding, Track, TrackId, UserRecord, DEFAULT_PLAYLIST_NAME,
};
