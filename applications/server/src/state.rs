/// Shared application state
use crate::config::ServerConfig;
use crate::error::Result;
use crate::services::{AuthService, RequestCoordinator};
use std::sync::Arc;
use tuneline_resolver::{ResolutionCache, YtDlpResolver};
use tuneline_storage::{PlaylistStore, UserStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<RequestCoordinator>,
    pub auth_service: Arc<AuthService>,
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new(coordinator: Arc<RequestCoordinator>, auth_service: Arc<AuthService>) -> Self {
        Self {
            coordinator,
            auth_service,
            http_client: reqwest::Client::new(),
        }
    }

    /// Open the stores and wire the real resolver from configuration
    pub async fn from_config(config: &ServerConfig) -> Result<Self> {
        let playlists = Arc::new(PlaylistStore::open(config.storage.playlists_path()).await?);
        let users = Arc::new(UserStore::open(config.storage.users_path()).await?);
        tracing::info!("Storage opened in {}", config.storage.data_dir.display());

        let resolver = Arc::new(YtDlpResolver::new(config.resolver.options()));
        let cache = ResolutionCache::with_stream_ttl(config.resolver.stream_ttl());
        let coordinator = Arc::new(RequestCoordinator::new(resolver, cache, playlists));
        tracing::info!(
            "Resolver: {} (timeout {}s)",
            config.resolver.binary_path.display(),
            config.resolver.timeout_secs
        );

        let auth_service = Arc::new(AuthService::new(
            users,
            config.auth.jwt_secret.clone(),
            config.auth.jwt_expiration_hours,
            config.auth.jwt_refresh_expiration_days,
        ));

        Ok(Self::new(coordinator, auth_service))
    }
}
