//! Full optimization pipeline: extraction → keywords → sections → rewrite → format → score.
//!
//! One call handles one resume end to end. Nothing is cached between calls.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::extraction::{extract_document, RawDocument};
use crate::optimizer::keywords::extract_keywords;
use crate::optimizer::rewrite::optimize;
use crate::optimizer::scoring::{AtsScorer, ScoreReport};
use crate::optimizer::sections::{normalize_line, parse_sections, Section, SectionType};
use crate::render::split_blocks;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Result types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct SectionSummary {
    pub title: String,
    pub section_type: SectionType,
    pub lines: usize,
}

impl From<&Section> for SectionSummary {
    fn from(section: &Section) -> Self {
        Self {
            title: section.title.clone(),
            section_type: section.section_type,
            lines: section.content.len(),
        }
    }
}

/// Everything produced for one resume.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedResult {
    /// Final formatted text, ready to display or render.
    pub content: String,
    pub keywords: Vec<String>,
    /// Score of `optimized_content`.
    pub score: u8,
    pub optimized_content: String,
    /// Extracted text in the canonical layout, before any rewriting.
    pub original_content: String,
    /// Score of `original_content` against the same keywords.
    pub baseline_score: u8,
    pub sections: Vec<SectionSummary>,
    pub report: ScoreReport,
}

// ────────────────────────────────────────────────────────────────────────────
// Stages
// ────────────────────────────────────────────────────────────────────────────

/// Canonical output layout: trimmed lines, `• ` bullets, one blank line between blocks.
pub fn format_content(text: &str) -> String {
    split_blocks(text)
        .into_iter()
        .map(|block| {
            block
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(normalize_line)
                .collect::<Vec<_>>()
                .join("\n")
        })
        .filter(|block| !block.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Optimizes already-extracted resume text against a job description.
pub fn optimize_resume_text(
    resume_text: &str,
    job_description: &str,
    scorer: &dyn AtsScorer,
) -> Result<ProcessedResult, AppError> {
    let keywords = extract_keywords(job_description);
    debug!("Extracted {} keywords", keywords.len());

    let sections = parse_sections(resume_text);
    debug!("Parsed {} sections", sections.len());

    let optimized = optimize(&sections, &keywords);
    if !resume_text.trim().is_empty() && optimized.trim().is_empty() {
        return Err(AppError::EmptyOutput(
            "optimizer returned no text for a non-empty resume".to_string(),
        ));
    }

    let optimized_content = format_content(&optimized);
    if optimized_content.is_empty() {
        return Err(AppError::EmptyOutput(
            "formatted resume is empty".to_string(),
        ));
    }

    let original_content = format_content(resume_text);
    let baseline = scorer.score(&original_content, &keywords);
    let report = scorer.score(&optimized_content, &keywords);
    info!(
        "Optimized resume ({} scorer): {} → {} across {} sections",
        scorer.backend(),
        baseline.score,
        report.score,
        sections.len()
    );

    Ok(ProcessedResult {
        content: optimized_content.clone(),
        keywords: keywords.texts(),
        score: report.score,
        optimized_content,
        original_content,
        baseline_score: baseline.score,
        sections: sections.iter().map(SectionSummary::from).collect(),
        report,
    })
}

/// Size check, extraction, then [`optimize_resume_text`].
pub async fn process_upload(
    state: &AppState,
    document: RawDocument,
    job_description: &str,
) -> Result<ProcessedResult, AppError> {
    let limit = state.config.max_upload_bytes;
    if document.bytes.len() > limit {
        warn!(
            "Rejected upload of {} bytes (limit {limit})",
            document.bytes.len()
        );
        return Err(AppError::PayloadTooLarge { limit });
    }

    let text = extract_document(&state.extractors, document, state.config.extract_timeout).await?;
    optimize_resume_text(&text, job_description, state.scorer.as_ref())
}
