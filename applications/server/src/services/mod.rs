/// Server services
pub mod auth;
pub mod coordinator;

pub use auth::AuthService;
pub use coordinator::RequestCoordinator;
