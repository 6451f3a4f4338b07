//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use latt_domain::error::LattError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    kind: String,
    error: String,
}

/// Maps [`LattError`] to an HTTP response with appropriate status code.
pub struct ApiError(LattError);

impl From<LattError> for ApiError {
    fn from(err: LattError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            LattError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            LattError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            LattError::Conflict(err) => (StatusCode::CONFLICT, err.to_string()),
            LattError::ForeignKey(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
            LattError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = ErrorBody {
            kind: self.0.kind().to_string(),
            error: message,
        };
        (status, Json(body)).into_response()
    }
}
