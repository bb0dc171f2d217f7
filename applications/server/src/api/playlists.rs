/// Playlists API routes
use crate::{
    api::search::stream_redirect, error::Result, middleware::AuthenticatedUser, state::AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};
use tuneline_core::{Track, TrackId};

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct CreatePlaylistResponse {
    pub message: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistQuery {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddTrackRequest {
    #[serde(alias = "song")]
    pub track: Track,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    #[serde(alias = "newOrderIds")]
    pub ids: Vec<TrackId>,
}

/// GET /api/playlists
/// Names of every playlist
pub async fn list_playlists(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Json<Vec<String>> {
    Json(app_state.coordinator.playlists().list_names().await)
}

/// POST /api/playlists
/// Create a new, empty playlist
pub async fn create_playlist(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    payload: std::result::Result<Json<CreatePlaylistRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatePlaylistResponse>)> {
    let Json(req) = payload?;
    app_state.coordinator.playlists().create(&req.name).await?;
    tracing::info!("Playlist '{}' created by '{}'", req.name, auth.username());

    Ok((
        StatusCode::CREATED,
        Json(CreatePlaylistResponse {
            message: format!("Playlist '{}' created.", req.name),
            name: req.name,
        }),
    ))
}

/// GET /api/playlist?name=
/// Tracks of the named playlist, or of the default playlist
pub async fn get_playlist_by_query(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
    Query(query): Query<PlaylistQuery>,
) -> Result<Json<Vec<Track>>> {
    let tracks = app_state
        .coordinator
        .playlists()
        .get_or_default(query.name.as_deref())
        .await?;
    Ok(Json(tracks))
}

/// GET /api/playlists/:name
pub async fn get_playlist(
    Path(name): Path<String>,
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Vec<Track>>> {
    let tracks = app_state.coordinator.playlists().get(&name).await?;
    Ok(Json(tracks))
}

/// POST /api/playlists/:name/tracks
/// Append a track; a track whose id is already present is ignored
pub async fn add_track_to_playlist(
    Path(name): Path<String>,
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
    payload: std::result::Result<Json<AddTrackRequest>, JsonRejection>,
) -> Result<Json<Vec<Track>>> {
    let Json(req) = payload?;
    let tracks = app_state
        .coordinator
        .playlists()
        .append(&name, req.track)
        .await?;
    Ok(Json(tracks))
}

/// DELETE /api/playlists/:name/tracks/:track_id
pub async fn remove_track_from_playlist(
    Path((name, track_id)): Path<(String, String)>,
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Vec<Track>>> {
    let tracks = app_state
        .coordinator
        .playlists()
        .remove(&name, &TrackId::new(track_id))
        .await?;
    Ok(Json(tracks))
}

/// DELETE /api/playlists/:name/tracks
pub async fn clear_playlist(
    Path(name): Path<String>,
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Vec<Track>>> {
    let tracks = app_state.coordinator.playlists().clear(&name).await?;
    Ok(Json(tracks))
}

/// PUT /api/playlists/:name/order
/// Replace the playlist with the listed ids, in order
pub async fn reorder_playlist(
    Path(name): Path<String>,
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
    payload: std::result::Result<Json<ReorderRequest>, JsonRejection>,
) -> Result<Json<Vec<Track>>> {
    let Json(req) = payload?;
    let tracks = app_state
        .coordinator
        .playlists()
        .reorder(&name, &req.ids)
        .await?;
    Ok(Json(tracks))
}

/// POST /api/playlists/:name/play
/// Add the track to the playlist, then redirect to its stream
pub async fn select_and_play(
    Path(name): Path<String>,
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
    payload: std::result::Result<Json<AddTrackRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(req) = payload?;
    let binding = app_state
        .coordinator
        .select_and_play(&name, req.track)
        .await?;
    stream_redirect(&binding.stream_url)
}
