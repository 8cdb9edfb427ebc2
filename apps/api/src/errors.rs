use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::gemini_client::GeminiError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(#[from] ExtractionError),

    /// Gemini answered with a non-success status.
    #[error("Upstream API error (status {status}): {details}")]
    Upstream { status: u16, details: Value },

    /// Gemini could not be reached, timed out, or sent an undecodable body.
    #[error("Upstream API unavailable: {0}")]
    UpstreamUnavailable(String),
}

impl From<GeminiError> for AppError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::Api { status, details } => AppError::Upstream { status, details },
            GeminiError::Http(e) => AppError::UpstreamUnavailable(e.to_string()),
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(err.body_text())
        } else {
            AppError::Validation(format!("Malformed multipart body: {}", err.body_text()))
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "code": "VALIDATION_ERROR", "message": msg }),
            ),
            AppError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                json!({ "code": "PAYLOAD_TOO_LARGE", "message": msg }),
            ),
            AppError::PdfExtraction(e) => {
                tracing::warn!("PDF extraction failed: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    json!({
                        "code": "PDF_EXTRACTION_ERROR",
                        "message": "The uploaded CV could not be read as a PDF"
                    }),
                )
            }
            AppError::Upstream { status, details } => {
                tracing::error!("Gemini API error (status {status}): {details}");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({
                        "code": "UPSTREAM_ERROR",
                        "message": "Failed to analyze CV",
                        "status_code": status,
                        "details": details
                    }),
                )
            }
            AppError::UpstreamUnavailable(msg) => {
                tracing::error!("Gemini API unavailable: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({
                        "code": "UPSTREAM_ERROR",
                        "message": "Failed to analyze CV"
                    }),
                )
            }
        };

        (status, Json(json!({ "error": body }))).into_response()
    }
}
