//! Mapping of service errors to HTTP responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use tracing::{debug, error};

use super::dto::{DetailResponse, ErrorResponse};
use crate::service::FaceError;

pub enum ApiError {
    Error(StatusCode, ErrorResponse),
    NotFound(String),
}

impl ApiError {
    pub fn bad_request(message: &str, code: &str) -> Self {
        ApiError::Error(StatusCode::BAD_REQUEST, ErrorResponse::new(message, code))
    }

    /// Map a service error. Validation failures answer 422, or 200 when
    /// `legacy_status` is set.
    pub fn from_face_error(err: FaceError, legacy_status: bool) -> Self {
        if err.is_validation() {
            debug!("Rejected request: {}", err);
            let status = if legacy_status {
                StatusCode::OK
            } else {
                StatusCode::UNPROCESSABLE_ENTITY
            };
            return ApiError::Error(status, ErrorResponse::message(&err.to_string()));
        }

        match err {
            FaceError::NameNotFound(_) => ApiError::NotFound(err.to_string()),
            FaceError::Provider(_) => {
                error!("Embedding provider failed: {}", err);
                ApiError::Error(
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse::new(&err.to_string(), "PROVIDER_FAILED"),
                )
            }
            _ => {
                error!("Storage failed: {}", err);
                ApiError::Error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(&err.to_string(), "STORAGE_FAILED"),
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Error(status, body) => (status, Json(body)).into_response(),
            ApiError::NotFound(detail) => {
                (StatusCode::NOT_FOUND, Json(DetailResponse { detail })).into_response()
            }
        }
    }
}
