mod ids;
mod playlist;
mod stream;
mod track;
mod user;

pub use ids::TrackId;
pub use playlist::{Playlist, DEFAULT_PLAYLIST_NAME};
pub use stream::StreamBinding;
pub use track::{SearchResultSet, Track};
pub use user::UserRecord;
