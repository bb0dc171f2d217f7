/// API route modules
pub mod auth;
pub mod health;
pub mod playlists;
pub mod search;
pub mod thumbnail;
