use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::render::PdfError;

/// Application-level error type. Every variant is terminal for a pipeline run.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// The upstream text-generation call did not succeed. `status` is absent for
    /// transport failures (connection refused, timeout) where no response arrived.
    #[error("{}", external_message(.status, .message))]
    ExternalService {
        status: Option<u16>,
        message: String,
    },

    #[error("Please enter a professional summary.")]
    EmptyInput,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

fn external_message(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("Error {code}: {message}"),
        None => format!("Error: {message}"),
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Api { status, message } => AppError::ExternalService {
                status: Some(status),
                message,
            },
            LlmError::Http(e) => AppError::ExternalService {
                status: e.status().map(|s| s.as_u16()),
                message: e.to_string(),
            },
            LlmError::Parse(e) => AppError::ExternalService {
                status: None,
                message: e.to_string(),
            },
            other => AppError::ExternalService {
                status: None,
                message: other.to_string(),
            },
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PdfError> for AppError {
    fn from(err: PdfError) -> Self {
        AppError::Render(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::ExternalService { .. } => {
                tracing::error!("External service error: {self}");
                // Surfaced verbatim: the user sees exactly what the upstream said.
                (StatusCode::BAD_GATEWAY, "EXTERNAL_SERVICE_ERROR", self.to_string())
            }
            AppError::EmptyInput => (StatusCode::BAD_REQUEST, "EMPTY_INPUT", self.to_string()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Render(msg) => {
                tracing::error!("Render error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_ERROR",
                    "The resume document could not be rendered".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
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
