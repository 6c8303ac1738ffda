use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use service::ServiceError;
use thiserror::Error;

pub const ENTITY_NOT_FOUND: &str = "entity-not-found";
pub const BAD_REQUEST: &str = "bad-request";
pub const INTERNAL_ERROR: &str = "internal-error";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Service(#[from] ServiceError),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
}

/// The JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, kind) = match &self {
            AppError::Service(ServiceError::NotFound(_)) | AppError::NotFound(_) => {
                (StatusCode::NOT_FOUND, ENTITY_NOT_FOUND)
            }
            AppError::Service(ServiceError::InvalidWindow(_) | ServiceError::InvalidDate(_))
            | AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, BAD_REQUEST),
            AppError::Service(err @ ServiceError::Internal { .. }) => {
                tracing::error!(error = ?err, "Failed to read price data.");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
            }
        };

        let body = Json(ApiError {
            kind: kind.to_string(),
            message,
        });
        (status, body).into_response()
    }
}
