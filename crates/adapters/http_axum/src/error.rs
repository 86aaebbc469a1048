//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use wattwise_domain::error::WattwiseError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`WattwiseError`] to an HTTP response with appropriate status code.
///
/// Internal failures (storage, platform) are logged here and surfaced to
/// the caller as a generic message only.
pub struct ApiError(WattwiseError);

impl From<WattwiseError> for ApiError {
    fn from(err: WattwiseError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            WattwiseError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            WattwiseError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            WattwiseError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            WattwiseError::Platform(err) => {
                tracing::error!(error = %err, "platform error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
