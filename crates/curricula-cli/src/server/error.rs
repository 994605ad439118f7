//! API error types and handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use curricula::CurriculaError;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Nothing matches the request.
    NotFound(String),
    /// Bad request from client.
    BadRequest(String),
    /// Internal server error.
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal", msg),
        };

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<CurriculaError> for ApiError {
    fn from(err: CurriculaError) -> Self {
        match err {
            CurriculaError::EmptyData(_) => ApiError::NotFound(err.to_string()),
            CurriculaError::UnknownDimension(_)
            | CurriculaError::UnsupportedFormat(_)
            | CurriculaError::Config(_) => ApiError::BadRequest(err.to_string()),
            CurriculaError::Io { .. }
            | CurriculaError::Json(_)
            | CurriculaError::Csv(_)
            | CurriculaError::Persistence(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_error_status() {
        let cases = [
            (CurriculaError::EmptyData("x".into()), StatusCode::NOT_FOUND),
            (CurriculaError::UnknownDimension("x".into()), StatusCode::BAD_REQUEST),
            (CurriculaError::Persistence("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }
}
