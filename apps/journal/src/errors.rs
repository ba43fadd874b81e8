use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::mood::extractor::ScoreParseError;
use crate::mood::submission::SubmitError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Inference error: {0}")]
    Inference(#[from] LlmError),

    #[error("Parse error: {0}")]
    Parse(#[from] ScoreParseError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<SubmitError> for AppError {
    fn from(e: SubmitError) -> Self {
        match e {
            SubmitError::Validation(msg) => AppError::Validation(msg),
            SubmitError::Inference(e) => AppError::Inference(e),
            SubmitError::Parse(e) => AppError::Parse(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Inference and parse failures were already logged with full detail
        // where they happened; the message shown inline is the error text itself.
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Inference(e) => (StatusCode::BAD_GATEWAY, "INFERENCE_ERROR", e.to_string()),
            AppError::Parse(e) => (StatusCode::BAD_GATEWAY, "PARSE_ERROR", e.to_string()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
