/// Thumbnail proxy
use crate::{
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::Response,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ThumbnailQuery {
    #[serde(default)]
    pub url: Option<String>,
}

/// GET /api/thumbnail?url=
/// Fetch a remote image and relay its body and content type
pub async fn thumbnail(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
    Query(query): Query<ThumbnailQuery>,
) -> Result<Response> {
    let url = query
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ServerError::BadRequest("Image URL is required".to_string()))?;

    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ServerError::BadRequest(
            "Image URL must be http or https".to_string(),
        ));
    }

    let upstream = app_state
        .http_client
        .get(&url)
        .send()
        .await
        .map_err(|e| ServerError::Upstream(format!("{}: {}", url, e)))?;

    let status = StatusCode::from_u16(upstream.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = upstream
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();

    let bytes = upstream
        .bytes()
        .await
        .map_err(|e| ServerError::Upstream(format!("{}: {}", url, e)))?;

    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CACHE_CONTROL, "public, max-age=86400")
        .body(Body::from(bytes))
        .map_err(|e| ServerError::Internal(format!("Failed to build response: {}", e)))
}
