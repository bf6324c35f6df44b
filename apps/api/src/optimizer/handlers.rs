//! Axum route handlers for the Optimizer API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::extraction::RawDocument;
use crate::optimizer::keywords::{extract_keywords, WeightClass};
use crate::optimizer::pipeline::{optimize_resume_text, process_upload, ProcessedResult};
use crate::optimizer::scoring::ScoreReport;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct OptimizeTextRequest {
    pub resume_text: String,
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct KeywordsRequest {
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct KeywordEntry {
    pub keyword: String,
    pub weight_class: WeightClass,
    pub weight: f64,
}

#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<KeywordEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub text: String,
    pub job_description: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/optimize
///
/// Multipart upload with a `file` part (pdf, docx or txt) and a `job_description` part.
/// Returns the extracted text, the optimized text and both scores.
pub async fn handle_optimize_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ProcessedResult>, AppError> {
    let limit = state.config.max_upload_bytes;
    let mut document: Option<RawDocument> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(|e| multipart_error(e, limit))?;
                document = Some(RawDocument {
                    bytes,
                    file_name,
                    content_type,
                });
            }
            Some("job_description") => {
                job_description = Some(field.text().await.map_err(|e| multipart_error(e, limit))?);
            }
            _ => {}
        }
    }

    let document =
        document.ok_or_else(|| AppError::Validation("multipart field 'file' is required".to_string()))?;
    let job_description = job_description.ok_or_else(|| {
        AppError::Validation("multipart field 'job_description' is required".to_string())
    })?;

    info!(
        "Optimize upload: {:?} ({} bytes)",
        document.file_name,
        document.bytes.len()
    );
    let result = process_upload(&state, document, &job_description).await?;
    Ok(Json(result))
}

fn multipart_error(error: MultipartError, limit: usize) -> AppError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { limit }
    } else {
        AppError::Validation(format!("Malformed multipart body: {}", error.body_text()))
    }
}

/// POST /api/v1/resumes/optimize-text
///
/// Same pipeline as the upload route, starting from already-extracted text.
pub async fn handle_optimize_text(
    State(state): State<AppState>,
    Json(request): Json<OptimizeTextRequest>,
) -> Result<Json<ProcessedResult>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text cannot be empty".to_string()));
    }

    let result = optimize_resume_text(
        &request.resume_text,
        &request.job_description,
        state.scorer.as_ref(),
    )?;
    Ok(Json(result))
}

/// POST /api/v1/keywords
///
/// Previews the weighted keyword set extracted from a job description.
pub async fn handle_keywords(
    Json(request): Json<KeywordsRequest>,
) -> Result<Json<KeywordsResponse>, AppError> {
    let keywords = extract_keywords(&request.job_description)
        .iter()
        .map(|keyword| KeywordEntry {
            keyword: keyword.text.clone(),
            weight_class: keyword.class,
            weight: keyword.weight(),
        })
        .collect();

    Ok(Json(KeywordsResponse { keywords }))
}

/// POST /api/v1/resumes/score
///
/// Scores arbitrary text against a job description without rewriting it.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreReport>, AppError> {
    let keywords = extract_keywords(&request.job_description);
    Ok(Json(state.scorer.score(&request.text, &keywords)))
}
