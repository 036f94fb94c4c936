use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use common::types::ApiResponse;
use service::errors::ServiceError;

/// Handler-level error carrying the status code and the envelope fields.
///
/// Converts into the uniform `{success: false, message, error}` body; nothing
/// propagates past the handler boundary unshaped.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub detail: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, detail: Option<String>) -> Self {
        Self { status, message: message.into(), detail }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, format!("Bad request: {}", message.into()), None)
    }

    /// Map a service failure onto the HTTP taxonomy: validation -> 400,
    /// not-found -> 404, anything else -> 500 with `context` as the message
    /// and the underlying error surfaced.
    pub fn from_service(err: ServiceError, context: &str) -> Self {
        match err {
            ServiceError::Model(e) => Self::bad_request(e.to_string()),
            ServiceError::NotFound(_) => {
                Self::new(StatusCode::NOT_FOUND, "Book not found", None)
            }
            other => {
                error!(error = %other, context, "request failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, context, Some(other.to_string()))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiResponse::<()>::failure(self.message, self.detail);
        (self.status, Json(body)).into_response()
    }
}
