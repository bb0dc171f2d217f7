/// HTTP router
use crate::{api, middleware, state::AppState};
use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the full application router
///
/// Everything lives under `/api`. When `web_dir` is given, other paths are
/// served from it as static files.
pub fn create_router(app_state: AppState, web_dir: Option<PathBuf>) -> Router {
    let auth_service = Arc::clone(&app_state.auth_service);

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/auth/register", post(api::auth::register))
        .route("/auth/login", post(api::auth::login))
        .route("/auth/refresh", post(api::auth::refresh))
        .route("/auth/me", get(api::auth::me));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        // Resolution
        .route("/search", get(api::search::search))
        .route("/play", get(api::search::play))
        .route("/thumbnail", get(api::thumbnail::thumbnail))
        // Playlists
        .route("/playlists", get(api::playlists::list_playlists))
        .route("/playlists", post(api::playlists::create_playlist))
        .route("/playlist", get(api::playlists::get_playlist_by_query))
        .route("/playlists/:name", get(api::playlists::get_playlist))
        .route(
            "/playlists/:name/tracks",
            post(api::playlists::add_track_to_playlist),
        )
        .route(
            "/playlists/:name/tracks",
            delete(api::playlists::clear_playlist),
        )
        .route(
            "/playlists/:name/tracks/:track_id",
            delete(api::playlists::remove_track_from_playlist),
        )
        .route("/playlists/:name/order", put(api::playlists::reorder_playlist))
        .route("/playlists/:name/play", post(api::playlists::select_and_play))
        .layer(axum_middleware::from_fn_with_state(
            auth_service,
            middleware::auth_middleware,
        ));

    let mut router = Router::new().nest("/api", public_routes.merge(protected_routes));

    if let Some(web_dir) = web_dir {
        tracing::info!("Serving web assets from {}", web_dir.display());
        router = router.fallback_service(ServeDir::new(web_dir));
    }

    router
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
