//! Common test utilities and fixtures
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use tuneline_core::{MediaResolver, Result, SearchResultSet, Track, TrackId, TunelineError};
use tuneline_resolver::ResolutionCache;
use tuneline_server::{create_router, AppState, AuthService, RequestCoordinator};
use tuneline_storage::{PlaylistStore, UserStore, PLAYLISTS_FILE, USERS_FILE};

/// Test user credentials
pub mod fixtures {
    pub const TEST_USERNAME: &str = "testuser";
    pub const TEST_PASSWORD: &str = "TestPassword123!";
    pub const JWT_SECRET: &str = "test-secret-key";
}

/// In-process resolver that counts its calls
///
/// Search returns ten tracks derived from the query, the first lasting
/// 125 seconds. Streams resolve to `https://cdn.test/<locator>`.
#[derive(Default)]
pub struct FakeResolver {
    pub search_calls: AtomicUsize,
    pub stream_calls: AtomicUsize,
    pub fail_searches: AtomicBool,
    pub fail_streams: AtomicBool,
    pub delay: Option<Duration>,
}

impl FakeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn stream_calls(&self) -> usize {
        self.stream_calls.load(Ordering::SeqCst)
    }

    async fn wait(&self, cancel: &CancellationToken) -> Result<()> {
        if let Some(delay) = self.delay {
            tokio::select! {
                () = tokio::time::sleep(delay) => {}
                () = cancel.cancelled() => return Err(TunelineError::ResolverCancelled),
            }
        }
        Ok(())
    }
}

pub fn sample_tracks(query: &str) -> SearchResultSet {
    (1..=10)
        .map(|i| {
            let id = format!("{}-{}", query.replace(' ', "_"), i);
            let mut track = Track::new(
                TrackId::new(id.clone()),
                format!("https://www.youtube.com/watch?v={}", id),
                format!("{} #{}", query, i),
            );
            let seconds = i * 125;
            track.duration_formatted = format!(
                "{:02}:{:02}:{:02}",
                seconds / 3600,
                (seconds % 3600) / 60,
                seconds % 60
            );
            track.channel_name = "Fake Channel".to_string();
            track
        })
        .collect()
}

#[async_trait]
impl MediaResolver for FakeResolver {
    async fn search(&self, query: &str, cancel: &CancellationToken) -> Result<SearchResultSet> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.wait(cancel).await?;
        if self.fail_searches.load(Ordering::SeqCst) {
            return Err(TunelineError::ResolverProcessFailed { exit_code: Some(1) });
        }
        Ok(sample_tracks(query))
    }

    async fn resolve_stream(&self, source_ref: &str, cancel: &CancellationToken) -> Result<String> {
        self.stream_calls.fetch_add(1, Ordering::SeqCst);
        self.wait(cancel).await?;
        if self.fail_streams.load(Ordering::SeqCst) {
            return Err(TunelineError::StreamResolutionEmpty);
        }
        Ok(format!("https://cdn.test/{}", source_ref))
    }
}

/// A fully wired application backed by a temp dir and a fake resolver
pub struct TestApp {
    pub router: Router,
    pub resolver: Arc<FakeResolver>,
    pub coordinator: Arc<RequestCoordinator>,
    pub auth_service: Arc<AuthService>,
    pub dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_resolver(FakeResolver::new()).await
    }

    pub async fn with_resolver(resolver: FakeResolver) -> Self {
        let dir = TempDir::new().unwrap();
        let resolver = Arc::new(resolver);

        let coordinator = create_test_coordinator(&dir, Arc::clone(&resolver)).await;

        let users = UserStore::open(dir.path().join(USERS_FILE)).await.unwrap();
        let auth_service = Arc::new(
            AuthService::new(Arc::new(users), fixtures::JWT_SECRET.to_string(), 1, 1)
                .with_hash_cost(4),
        );

        let app_state = AppState::new(Arc::clone(&coordinator), Arc::clone(&auth_service));
        let router = create_router(app_state, None);

        Self {
            router,
            resolver,
            coordinator,
            auth_service,
            dir,
        }
    }

    /// Register the test user and return a valid access token
    pub async fn login(&self) -> String {
        self.auth_service
            .register(fixtures::TEST_USERNAME, fixtures::TEST_PASSWORD)
            .await
            .unwrap();
        self.auth_service
            .login(fixtures::TEST_USERNAME, fixtures::TEST_PASSWORD)
            .await
            .unwrap()
            .access_token
    }
}

pub async fn create_test_coordinator(
    dir: &TempDir,
    resolver: Arc<FakeResolver>,
) -> Arc<RequestCoordinator> {
    let playlists = PlaylistStore::open(dir.path().join(PLAYLISTS_FILE))
        .await
        .unwrap();
    Arc::new(RequestCoordinator::new(
        resolver,
        ResolutionCache::new(),
        Arc::new(playlists),
    ))
}

pub fn get(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub fn delete(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub fn json(method: &str, uri: &str, token: Option<&str>, body: &serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}
