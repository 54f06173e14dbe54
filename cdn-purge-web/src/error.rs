//! HTTP error mapping

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use cdn_purge_core::{AuthError, CoreError};
use serde_json::json;
use thiserror::Error;

/// Handler-level error, rendered as `{"error": "..."}`
#[derive(Debug, Error)]
pub enum ApiError {
    /// No session, or the session did not verify
    #[error("Not authenticated")]
    Unauthorized,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Application state is not configured")]
    MissingState,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized | Self::Auth(AuthError::InvalidCredentials) => {
                StatusCode::UNAUTHORIZED
            }
            Self::Auth(AuthError::NotPermitted { .. }) => StatusCode::FORBIDDEN,
            Self::Auth(AuthError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Core(CoreError::ValidationError(_)) => StatusCode::BAD_REQUEST,
            Self::Core(CoreError::SessionError(_)) => StatusCode::UNAUTHORIZED,
            Self::Core(_) | Self::MissingState => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
