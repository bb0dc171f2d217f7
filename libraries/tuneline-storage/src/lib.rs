//! Tuneline Storage
//!
//! File-backed persistence for playlists and user credentials.
//!
//! Each store keeps its whole document in memory and rewrites the whole file
//! on every mutation. Writes go to a sibling temporary file that is then
//! renamed over the target, so a crash mid-write leaves the previous copy
//! intact.
//!
//! # Example
//!
//! ```rust,no_run
//! use tuneline_storage::PlaylistStore;
//!
//! # async fn example() -> tuneline_core::Result<()> {
//! let store = PlaylistStore::open("data/playlists.json").await?;
//! store.create("Chill").await?;
//! let names = store.list_names().await;
//! assert!(names.contains(&"Chill".to_string()));
//! # Ok(())
//! # }
//! ```

mod error;
mod persist;

pub mod playlists;
pub mod users;

pub use error::StorageError;
pub use persist::{read_document, write_document};
pub use playlists::PlaylistStore;
pub use users::UserStore;

/// File name of the playlist document inside the data directory
pub const PLAYLISTS_FILE: &str = "playlists.json";

/// File name of the credential document inside the data directory
pub const USERS_FILE: &str = "users.json";
