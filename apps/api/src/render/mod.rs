//! Output Renderer — turns optimized resume text into a downloadable PDF, DOCX or plain
//! text file.
//!
//! Algorithm:
//! 1. Split the text into blocks on blank lines
//! 2. Classify every line as header, bullet or body
//! 3. Hand the styled blocks to the `DocumentWriter` for the requested format
//!
//! Writers are CPU-bound and run on the blocking pool. Binary encoding is delegated to
//! `lopdf` and `zip`.

pub mod docx;
pub mod font_metrics;
pub mod handlers;
pub mod pdf;
pub mod text;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::optimizer::sections::BULLET;

static BLANK_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

// ────────────────────────────────────────────────────────────────────────────
// Output formats
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pdf,
    Docx,
    Txt,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Docx => "docx",
            OutputFormat::Txt => "txt",
        }
    }

    /// Download name, e.g. `optimized-resume.pdf`.
    pub fn file_name(self) -> String {
        format!("optimized-resume.{}", self.extension())
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "application/pdf",
            OutputFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            OutputFormat::Txt => "text/plain; charset=utf-8",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(OutputFormat::Pdf),
            "docx" => Ok(OutputFormat::Docx),
            "txt" => Ok(OutputFormat::Txt),
            other => Err(AppError::UnsupportedFormat(format!("output format '{other}'"))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Line classification
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Header,
    Bullet,
    Body,
}

impl LineStyle {
    /// Bullets are checked first, so an all-caps bullet is still a bullet, and a header
    /// needs at least one letter, so "2019 - 2023" stays body text. A plain
    /// "upper-cased equals itself" test would style both of those as headers; this
    /// classifier deliberately does not.
    pub fn classify(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.starts_with(BULLET) {
            LineStyle::Bullet
        } else if trimmed.chars().any(char::is_alphabetic)
            && !trimmed.chars().any(char::is_lowercase)
        {
            LineStyle::Header
        } else {
            LineStyle::Body
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledLine {
    pub style: LineStyle,
    /// Trimmed line text; bullets keep their `• ` prefix.
    pub text: String,
}

impl StyledLine {
    fn new(line: &str) -> Self {
        Self {
            style: LineStyle::classify(line),
            text: line.trim().to_string(),
        }
    }
}

/// Text split into blank-line separated blocks of classified lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledDocument {
    pub blocks: Vec<Vec<StyledLine>>,
}

impl StyledDocument {
    pub fn parse(text: &str) -> Self {
        let blocks = split_blocks(text)
            .into_iter()
            .map(|block| {
                block
                    .lines()
                    .filter(|line| !line.trim().is_empty())
                    .map(StyledLine::new)
                    .collect::<Vec<_>>()
            })
            .filter(|lines| !lines.is_empty())
            .collect();
        Self { blocks }
    }
}

/// Splits on blank lines (whitespace-only lines count as blank). Empty blocks are dropped.
pub fn split_blocks(text: &str) -> Vec<&str> {
    BLANK_LINE
        .split(text)
        .filter(|block| !block.trim().is_empty())
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Capability trait
// ────────────────────────────────────────────────────────────────────────────

/// Text in, file bytes out. Implement this to swap an encoder.
#[async_trait]
pub trait DocumentWriter: Send + Sync {
    async fn write(&self, text: &str) -> Result<Bytes, AppError>;
}

pub struct PlainTextWriter;

#[async_trait]
impl DocumentWriter for PlainTextWriter {
    async fn write(&self, text: &str) -> Result<Bytes, AppError> {
        Ok(text::write_text(text))
    }
}

/// `lopdf` writer using the built-in Helvetica fonts.
pub struct PdfWriter;

#[async_trait]
impl DocumentWriter for PdfWriter {
    async fn write(&self, text: &str) -> Result<Bytes, AppError> {
        let document = StyledDocument::parse(text);
        run_writer("pdf", move || pdf::write_pdf(&document)).await
    }
}

/// WordprocessingML writer (zip + hand-built XML parts).
pub struct DocxWriter;

#[async_trait]
impl DocumentWriter for DocxWriter {
    async fn write(&self, text: &str) -> Result<Bytes, AppError> {
        let document = StyledDocument::parse(text);
        run_writer("docx", move || docx::write_docx(&document)).await
    }
}

/// Runs a blocking encoder off the async executor.
async fn run_writer<F>(writer: &'static str, write: F) -> Result<Bytes, AppError>
where
    F: FnOnce() -> anyhow::Result<Vec<u8>> + Send + 'static,
{
    let bytes = tokio::task::spawn_blocking(write)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("{writer} writer crashed: {e}")))??;
    Ok(Bytes::from(bytes))
}

/// One writer per output format.
#[derive(Clone)]
pub struct Writers {
    pub pdf: Arc<dyn DocumentWriter>,
    pub docx: Arc<dyn DocumentWriter>,
    pub txt: Arc<dyn DocumentWriter>,
}

impl Default for Writers {
    fn default() -> Self {
        Self {
            pdf: Arc::new(PdfWriter),
            docx: Arc::new(DocxWriter),
            txt: Arc::new(PlainTextWriter),
        }
    }
}

impl Writers {
    pub fn for_format(&self, format: OutputFormat) -> &dyn DocumentWriter {
        match format {
            OutputFormat::Pdf => self.pdf.as_ref(),
            OutputFormat::Docx => self.docx.as_ref(),
            OutputFormat::Txt => self.txt.as_ref(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Entry point
// ────────────────────────────────────────────────────────────────────────────

/// Renders `text` in the requested format. Blank text renders an empty document.
pub async fn render(text: &str, format: OutputFormat, writers: &Writers) -> Result<Bytes, AppError> {
    info!("Rendering {} chars as {format}", text.len());
    let bytes = writers.for_format(format).write(text).await?;
    debug!("Rendered {format}: {} bytes", bytes.len());
    Ok(bytes)
}
