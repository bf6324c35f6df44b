//! Axum route handlers for the Render API.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;

use crate::errors::AppError;
use crate::render::{render, OutputFormat};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub content: String,
    pub format: String,
}

/// POST /api/v1/resumes/render
///
/// Renders optimized text as a downloadable file. `format` is one of pdf, docx, txt.
pub async fn handle_render(
    State(state): State<AppState>,
    Json(request): Json<RenderRequest>,
) -> Result<Response, AppError> {
    let format: OutputFormat = request.format.parse()?;
    let bytes = render(&request.content, format, &state.writers).await?;
    Ok(download_response(format, bytes))
}

/// Attaches the content type and an `attachment` disposition naming the file.
pub fn download_response(format: OutputFormat, bytes: Bytes) -> Response {
    (
        [
            (header::CONTENT_TYPE, format.mime_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", format.file_name()),
            ),
        ],
        bytes,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_headers() {
        let response = download_response(OutputFormat::Docx, Bytes::from_static(b"PK"));
        let headers = response.headers();
        assert_eq!(
            headers[header::CONTENT_TYPE],
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"optimized-resume.docx\""
        );
    }
}
