//! DOCX writer built on the `docx-rs` document model.
//!
//! One paragraph per styled line, plus an empty spacer paragraph between blocks.
//! Headers use the `Heading1` style; body and bullet runs are Arial 12pt, and bullets
//! carry a hanging indent.

use std::io::Cursor;

use anyhow::Result;
use docx_rs::{
    Docx, LineSpacing, PageMargin, Paragraph, Run, RunFonts, SpecialIndentType, Style, StyleType,
};

use crate::render::{LineStyle, StyledDocument, StyledLine};

const HEADING_STYLE: &str = "Heading1";
/// Half-points.
const BODY_SIZE: usize = 24;
const HEADING_SIZE: usize = 32;
/// Twentieths of a point.
const LINE_SPACING: i32 = 360;
const HEADER_SPACING_AFTER: u32 = 200;
const BODY_SPACING_AFTER: u32 = 100;
const BULLET_INDENT: i32 = 720;
const BULLET_HANGING: i32 = 360;
/// US letter with one-inch margins.
const PAGE_WIDTH: u32 = 12240;
const PAGE_HEIGHT: u32 = 15840;
const PAGE_MARGIN: i32 = 1440;

fn arial() -> RunFonts {
    RunFonts::new().ascii("Arial").hi_ansi("Arial")
}

fn heading_style() -> Style {
    Style::new(HEADING_STYLE, StyleType::Paragraph)
        .name("Heading 1")
        .bold()
        .size(HEADING_SIZE)
}

fn paragraph(line: &StyledLine) -> Paragraph {
    match line.style {
        LineStyle::Header => Paragraph::new()
            .style(HEADING_STYLE)
            .line_spacing(
                LineSpacing::new()
                    .after(HEADER_SPACING_AFTER)
                    .line(LINE_SPACING),
            )
            .add_run(
                Run::new()
                    .add_text(line.text.as_str())
                    .fonts(arial())
                    .bold()
                    .size(HEADING_SIZE),
            ),
        LineStyle::Bullet => body_paragraph(line).indent(
            Some(BULLET_INDENT),
            Some(SpecialIndentType::Hanging(BULLET_HANGING)),
            None,
            None,
        ),
        LineStyle::Body => body_paragraph(line),
    }
}

fn body_paragraph(line: &StyledLine) -> Paragraph {
    Paragraph::new()
        .line_spacing(LineSpacing::new().after(BODY_SPACING_AFTER).line(LINE_SPACING))
        .add_run(
            Run::new()
                .add_text(line.text.as_str())
                .fonts(arial())
                .size(BODY_SIZE),
        )
}

/// Builds the document model for `document`.
pub fn build_docx(document: &StyledDocument) -> Docx {
    let mut docx = Docx::new()
        .page_size(PAGE_WIDTH, PAGE_HEIGHT)
        .page_margin(
            PageMargin::new()
                .top(PAGE_MARGIN)
                .bottom(PAGE_MARGIN)
                .left(PAGE_MARGIN)
                .right(PAGE_MARGIN),
        )
        .add_style(heading_style());

    for (index, block) in document.blocks.iter().enumerate() {
        if index > 0 {
            docx = docx.add_paragraph(Paragraph::new());
        }
        for line in block {
            docx = docx.add_paragraph(paragraph(line));
        }
    }
    docx
}

/// Encodes `document` as a complete `.docx` package.
pub fn write_docx(document: &StyledDocument) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    build_docx(document).build().pack(&mut cursor)?;
    Ok(cursor.into_inner())
}
