/// Search and play API routes
use crate::{
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    extract::{Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tuneline_core::SearchResultSet;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlayQuery {
    #[serde(default)]
    pub url: Option<String>,
}

/// GET /api/search?q=
pub async fn search(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResultSet>> {
    let q = query.q.unwrap_or_default();
    tracing::debug!("Search {:?} by '{}'", q, auth.username());

    let tracks = app_state.coordinator.search(&q).await?;
    Ok(Json(tracks))
}

/// GET /api/play?url=
/// Redirects to the direct stream URL; the client fetches media itself
pub async fn play(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
    Query(query): Query<PlayQuery>,
) -> Result<Response> {
    let binding = app_state
        .coordinator
        .play(query.url.as_deref().unwrap_or_default())
        .await?;

    stream_redirect(&binding.stream_url)
}

/// 307 to a resolved stream URL
///
/// Fails instead of panicking when the URL cannot be a header value.
pub(crate) fn stream_redirect(stream_url: &str) -> Result<Response> {
    let location = HeaderValue::try_from(stream_url).map_err(|e| {
        ServerError::Internal(format!("Unusable stream URL {:?}: {}", stream_url, e))
    })?;

    Ok((StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_redirect() {
        let response = stream_redirect("https://cdn.example.com/a.webm?sig=1").unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://cdn.example.com/a.webm?sig=1"
        );
    }

    #[test]
    fn test_stream_redirect_rejects_control_bytes() {
        let err = stream_redirect("https://cdn.example/a\u{1}b").unwrap_err();
        assert!(matches!(err, ServerError::Internal(_)));
    }
}
