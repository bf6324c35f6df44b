//! Document Extractor — converts an uploaded resume (PDF, DOCX or plain text) into one
//! UTF-8 text blob in reading order.
//!
//! Binary decoding is delegated to external crates behind the `TextExtractor` capability
//! trait. This module owns only kind resolution, dispatch, and the timeout/empty checks.
//! Decoders are CPU-bound and may panic on malformed input, so they run on the blocking pool.

pub mod docx;
pub mod pdf;
pub mod text;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, info};

use crate::errors::AppError;

// ────────────────────────────────────────────────────────────────────────────
// Media kinds
// ────────────────────────────────────────────────────────────────────────────

/// Declared media kind of an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Pdf,
    Docx,
    Txt,
}

impl MediaKind {
    /// Resolves the kind from the file name extension, falling back to the content type.
    ///
    /// `.doc` is routed to the DOCX decoder; legacy binary Word files fail there with an
    /// extraction error rather than being rejected up front.
    pub fn resolve(file_name: Option<&str>, content_type: Option<&str>) -> Result<Self, AppError> {
        if let Some(ext) = file_name.and_then(extension_of) {
            match ext.as_str() {
                "pdf" => return Ok(MediaKind::Pdf),
                "docx" | "doc" => return Ok(MediaKind::Docx),
                "txt" => return Ok(MediaKind::Txt),
                _ => {}
            }
        }

        if let Some(content_type) = content_type {
            let content_type = content_type.to_ascii_lowercase();
            if content_type == "application/pdf" {
                return Ok(MediaKind::Pdf);
            }
            if content_type.contains("word") {
                return Ok(MediaKind::Docx);
            }
            if content_type.starts_with("text/plain") {
                return Ok(MediaKind::Txt);
            }
        }

        Err(AppError::UnsupportedFormat(format!(
            "file '{}' ({})",
            file_name.unwrap_or("<unnamed>"),
            content_type.unwrap_or("no content type")
        )))
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MediaKind::Pdf => "pdf",
            MediaKind::Docx => "docx",
            MediaKind::Txt => "txt",
        })
    }
}

fn extension_of(file_name: &str) -> Option<String> {
    let (_, ext) = file_name.rsplit_once('.')?;
    Some(ext.trim().to_ascii_lowercase())
}

/// An uploaded file as received from the caller. Never retained past one extraction.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub bytes: Bytes,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
}

impl RawDocument {
    pub fn kind(&self) -> Result<MediaKind, AppError> {
        MediaKind::resolve(self.file_name.as_deref(), self.content_type.as_deref())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Capability trait
// ────────────────────────────────────────────────────────────────────────────

/// Bytes in, text out. Implement this to swap a decoder (or inject a fake in tests).
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, bytes: Bytes) -> Result<String, AppError>;
}

/// `pdf-extract` text layer reader.
pub struct PdfTextExtractor {
    pub all_pages: bool,
}

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract_text(&self, bytes: Bytes) -> Result<String, AppError> {
        let all_pages = self.all_pages;
        run_decoder("pdf", move || pdf::extract_pdf_text(&bytes, all_pages)).await
    }
}

/// DOCX raw-text extractor (zip + WordprocessingML paragraphs).
pub struct DocxTextExtractor;

#[async_trait]
impl TextExtractor for DocxTextExtractor {
    async fn extract_text(&self, bytes: Bytes) -> Result<String, AppError> {
        run_decoder("docx", move || docx::extract_docx_text(&bytes)).await
    }
}

pub struct PlainTextExtractor;

#[async_trait]
impl TextExtractor for PlainTextExtractor {
    async fn extract_text(&self, bytes: Bytes) -> Result<String, AppError> {
        Ok(text::decode_plain_text(&bytes))
    }
}

/// Runs a blocking decoder off the async executor. Panics surface as extraction errors.
async fn run_decoder<F>(decoder: &'static str, decode: F) -> Result<String, AppError>
where
    F: FnOnce() -> anyhow::Result<String> + Send + 'static,
{
    tokio::task::spawn_blocking(decode)
        .await
        .map_err(|e| AppError::Extraction(anyhow::anyhow!("{decoder} decoder crashed: {e}")))?
        .map_err(AppError::Extraction)
}

/// One extractor per media kind.
#[derive(Clone)]
pub struct Extractors {
    pub pdf: Arc<dyn TextExtractor>,
    pub docx: Arc<dyn TextExtractor>,
    pub txt: Arc<dyn TextExtractor>,
}

impl Extractors {
    pub fn new(pdf_all_pages: bool) -> Self {
        Self {
            pdf: Arc::new(PdfTextExtractor {
                all_pages: pdf_all_pages,
            }),
            docx: Arc::new(DocxTextExtractor),
            txt: Arc::new(PlainTextExtractor),
        }
    }

    pub fn for_kind(&self, kind: MediaKind) -> &dyn TextExtractor {
        match kind {
            MediaKind::Pdf => self.pdf.as_ref(),
            MediaKind::Docx => self.docx.as_ref(),
            MediaKind::Txt => self.txt.as_ref(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Entry point
// ────────────────────────────────────────────────────────────────────────────

/// Extracts the text of `document`, bounded by `timeout` when one is configured.
///
/// The timeout abandons the wait, not the decoder thread itself.
pub async fn extract_document(
    extractors: &Extractors,
    document: RawDocument,
    timeout: Option<Duration>,
) -> Result<String, AppError> {
    let kind = document.kind()?;
    info!(
        "Extracting {kind} upload ({} bytes, name={:?})",
        document.bytes.len(),
        document.file_name
    );

    let pending = extractors.for_kind(kind).extract_text(document.bytes);
    let text = match timeout {
        Some(limit) => tokio::time::timeout(limit, pending).await.map_err(|_| {
            AppError::Extraction(anyhow::anyhow!(
                "{kind} extraction timed out after {}s",
                limit.as_secs()
            ))
        })??,
        None => pending.await?,
    };

    if text.trim().is_empty() {
        return Err(AppError::Extraction(anyhow::anyhow!(
            "{kind} document contains no extractable text"
        )));
    }

    debug!("Extracted {} chars from {kind} upload", text.len());
    Ok(text)
}
