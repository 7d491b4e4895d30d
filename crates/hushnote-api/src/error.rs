//! HTTP error mapping.
//!
//! Every handler returns `Result<_, ApiError>`; core errors convert into
//! the right status code here. Infrastructure faults are logged with full
//! detail but surface to the client as a generic message; validation and
//! authentication failures keep their user-facing text so the caller can
//! render the right field-level message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

/// API-level error with an HTTP status mapping.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    NotImplemented(String),
    Internal(String),
}

impl From<hushnote_core::Error> for ApiError {
    fn from(err: hushnote_core::Error) -> Self {
        use hushnote_core::Error;
        match err {
            Error::Validation(msg) => ApiError::BadRequest(msg),
            Error::AuthFailed(msg) => ApiError::Forbidden(msg),
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::NoteNotFound(id) => ApiError::NotFound(format!("Note not found: {id}")),
            Error::ImageNotFound(id) => ApiError::NotFound(format!("Image not found: {id}")),
            Error::Database(e) => {
                error!(subsystem = "api", error = %e, "Database failure");
                ApiError::Internal("internal server error".to_string())
            }
            Error::Crypto(e) => {
                error!(subsystem = "api", error = %e, "Crypto failure");
                ApiError::Internal("internal server error".to_string())
            }
            Error::Internal(e) => {
                error!(subsystem = "api", error = %e, "Internal failure");
                ApiError::Internal("internal server error".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::NotImplemented(msg) => (StatusCode::NOT_IMPLEMENTED, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
