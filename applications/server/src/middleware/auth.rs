/// Authentication middleware
use crate::{error::ServerError, services::AuthService};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Extension type to store the authenticated username in the request
/// Can be used as an extractor in handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub String);

impl AuthenticatedUser {
    pub fn username(&self) -> &str {
        &self.0
    }
}

/// Bearer token from the Authorization header, if present
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// Middleware that extracts and validates JWT from Authorization header
pub async fn auth_middleware(
    State(auth_service): State<Arc<AuthService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = bearer_token(request.headers()).ok_or(StatusCode::UNAUTHORIZED)?;

    let username = auth_service.verify_access_token(token).map_err(|e| {
        tracing::warn!("Token verification failed: {}", e);
        StatusCode::UNAUTHORIZED
    })?;

    request.extensions_mut().insert(AuthenticatedUser(username));

    Ok(next.run(request).await)
}

/// Implement FromRequestParts so AuthenticatedUser can be used as an extractor
#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| ServerError::Auth("Not authenticated".to_string()))
    }
}
