use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Upload type or requested output format is not pdf/docx/txt.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// An underlying PDF/DOCX decoder failed; wraps the original cause.
    #[error("Extraction failed: {0}")]
    Extraction(#[source] anyhow::Error),

    /// The optimizer or formatter produced nothing from non-empty input.
    #[error("Empty output: {0}")]
    EmptyOutput(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upload exceeds the {limit} byte limit")]
    PayloadTooLarge { limit: usize },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Machine-readable code carried in the JSON error body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            AppError::Extraction(_) => "EXTRACTION_ERROR",
            AppError::EmptyOutput(_) => "EMPTY_OUTPUT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::UnsupportedFormat(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                format!("Unsupported format: {msg}. Use pdf, docx or txt."),
            ),
            AppError::Extraction(e) => {
                tracing::error!("Extraction error: {e:?}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "Failed to process resume".to_string(),
                )
            }
            AppError::EmptyOutput(msg) => {
                tracing::error!("Empty output: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The optimizer produced no content to render".to_string(),
                )
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::PayloadTooLarge { .. } => (StatusCode::PAYLOAD_TOO_LARGE, self.to_string()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_format_maps_to_415() {
        let response = AppError::UnsupportedFormat("rtf".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[test]
    fn test_extraction_maps_to_422() {
        let err = AppError::Extraction(anyhow::anyhow!("bad xref table"));
        assert_eq!(err.code(), "EXTRACTION_ERROR");
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_empty_output_is_distinct_from_extraction() {
        let err = AppError::EmptyOutput("blank".to_string());
        assert_eq!(err.code(), "EMPTY_OUTPUT");
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_payload_too_large_message_names_limit() {
        let err = AppError::PayloadTooLarge { limit: 5 };
        assert!(err.to_string().contains("5 byte limit"));
        assert_eq!(err.into_response().status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
