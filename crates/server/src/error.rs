use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use stockflow_core::errors::CoreError;
use thiserror::Error;

use crate::http::types::MessageBody;

/// Startup / runtime failures of the server process.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of a single request, mapped to a status and a `{ message }` body.
///
/// Store details are logged, never sent to the client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid stock data payload: {0}")]
    BadPayload(String),

    #[error("Failed to read data")]
    ReadFailed(#[source] CoreError),

    #[error("Failed to save data")]
    SaveFailed(#[source] CoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::ReadFailed(_) | ApiError::SaveFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::BadPayload(detail) => {
                tracing::warn!(%detail, "rejected stock data payload");
            }
            ApiError::ReadFailed(e) => tracing::error!(error = %e, "failed to read data"),
            ApiError::SaveFailed(e) => tracing::error!(error = %e, "failed to save data"),
        }
        let body = MessageBody::new(self.to_string());
        (self.status(), Json(body)).into_response()
    }
}
