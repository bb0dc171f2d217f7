//! Tuneline Server Library
//!
//! HTTP front end for media search, stream resolution and playlists, with
//! bearer-token authentication.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod router;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use router::create_router;
pub use services::{auth::AuthService, coordinator::RequestCoordinator};
pub use state::AppState;
