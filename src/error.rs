//! Error types for the HTTP layer.
//!
//! Startup and inference code report failures through `anyhow`; this module
//! maps them onto status codes and a `{"detail": ...}` body.

use crate::types::response::ErrorBody;
use axum::extract::rejection::{BytesRejection, JsonRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::{error, warn};

/// Errors returned by request handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body was not valid JSON or did not match the request schema.
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] JsonRejection),

    /// Body could not be read.
    #[error("Unreadable body: {0}")]
    Body(#[from] BytesRejection),

    /// Scaler or model failed on a well-formed request.
    #[error("Prediction failed: {0:#}")]
    Inference(anyhow::Error),
}

impl ApiError {
    /// Status code sent to the client
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(rejection) => rejection.status(),
            ApiError::Body(rejection) => rejection.status(),
            ApiError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            ApiError::InvalidRequest(rejection) => {
                warn!(status = %status, reason = %rejection.body_text(), "Rejected request");
                rejection.body_text()
            }
            ApiError::Body(rejection) => {
                warn!(status = %status, reason = %rejection.body_text(), "Unreadable body");
                rejection.body_text()
            }
            ApiError::Inference(e) => {
                error!(error = %format!("{:#}", e), "Inference failed");
                "Internal Server Error".to_string()
            }
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}
