/// Authentication API routes
use crate::{error::Result, middleware::bearer_token, state::AppState};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub username: String,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatusResponse {
    pub is_authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// POST /api/auth/register
pub async fn register(
    State(app_state): State<AppState>,
    payload: std::result::Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let Json(req) = payload?;
    app_state
        .auth_service
        .register(&req.username, &req.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully.".to_string(),
        }),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(app_state): State<AppState>,
    payload: std::result::Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>> {
    let Json(req) = payload?;
    let tokens = app_state
        .auth_service
        .login(&req.username, &req.password)
        .await?;

    Ok(Json(LoginResponse {
        message: "Logged in successfully.".to_string(),
        username: req.username,
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        token_type: "Bearer".to_string(),
    }))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(app_state): State<AppState>,
    payload: std::result::Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Json<RefreshResponse>> {
    let Json(req) = payload?;
    let username = app_state
        .auth_service
        .verify_refresh_token(&req.refresh_token)?;

    let access_token = app_state.auth_service.create_access_token(&username)?;

    Ok(Json(RefreshResponse {
        access_token,
        token_type: "Bearer".to_string(),
    }))
}

/// GET /api/auth/me
/// Reports whether the caller holds a valid access token; never rejects
pub async fn me(State(app_state): State<AppState>, headers: HeaderMap) -> Json<AuthStatusResponse> {
    let username = bearer_token(&headers)
        .and_then(|token| app_state.auth_service.verify_access_token(token).ok());

    Json(AuthStatusResponse {
        is_authenticated: username.is_some(),
        username,
    })
}
