/// Server error types
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tuneline_core::TunelineError;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Domain(#[from] TunelineError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

impl ServerError {
    /// Status code and client-facing message
    ///
    /// Internal failures are logged here and reduced to a generic message.
    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            ServerError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg),
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::Domain(e) => domain_status(e),
            ServerError::Upstream(ref msg) => {
                tracing::error!("Upstream error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error proxying image".to_string(),
                )
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
            ServerError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ServerError::Io(ref e) => {
                tracing::error!("IO error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "IO error".to_string())
            }
            ServerError::Jwt(ref e) => {
                tracing::warn!("JWT error: {:?}", e);
                (StatusCode::UNAUTHORIZED, "Invalid token".to_string())
            }
            ServerError::Bcrypt(ref e) => {
                tracing::error!("Bcrypt error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Password error".to_string(),
                )
            }
        }
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}

fn domain_status(err: TunelineError) -> (StatusCode, String) {
    match err {
        TunelineError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
        TunelineError::InvalidCredentials => (StatusCode::UNAUTHORIZED, err.to_string()),
        TunelineError::PlaylistNotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        TunelineError::PlaylistAlreadyExists(_) | TunelineError::UserAlreadyExists(_) => {
            (StatusCode::CONFLICT, err.to_string())
        }
        TunelineError::ResolverTimeout(_) => {
            tracing::error!("Resolver error: {}", err);
            (
                StatusCode::GATEWAY_TIMEOUT,
                "Media resolution timed out".to_string(),
            )
        }
        ref e if e.is_resolver_failure() => {
            tracing::error!("Resolver error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to resolve media".to_string(),
            )
        }
        TunelineError::PersistenceWriteFailure { .. }
        | TunelineError::PersistenceReadFailure { .. } => {
            tracing::error!("Storage error: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Storage error".to_string(),
            )
        }
        e => {
            tracing::error!("Internal error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = self.status_and_message();

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
