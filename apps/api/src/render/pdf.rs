//! PDF writer: lays styled lines out on US-letter pages, then encodes them with `lopdf`.
//!
//! Layout is a plain top-down cursor. Each line moves the cursor down by its leading,
//! blocks are separated by a fixed gap, and a line that would cross the bottom margin
//! starts a new page. Text uses the standard Helvetica fonts with WinAnsi encoding, so
//! no font program is embedded.

use anyhow::Result;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

use crate::render::font_metrics::{FontMetricTable, HELVETICA, HELVETICA_BOLD};
use crate::render::{LineStyle, StyledDocument};

pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;
pub const MARGIN: f32 = 72.0;

pub const HEADER_SIZE: f32 = 16.0;
pub const BODY_SIZE: f32 = 12.0;
pub const BULLET_INDENT: f32 = 18.0;

const HEADER_LEADING: f32 = 24.0;
const BODY_LEADING: f32 = 16.0;
const BLOCK_GAP: f32 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfFont {
    Regular,
    Bold,
}

impl PdfFont {
    fn resource_name(self) -> &'static str {
        match self {
            PdfFont::Regular => "F1",
            PdfFont::Bold => "F2",
        }
    }

    fn metrics(self) -> &'static FontMetricTable {
        match self {
            PdfFont::Regular => &HELVETICA,
            PdfFont::Bold => &HELVETICA_BOLD,
        }
    }
}

/// One wrapped line at its final position (PDF user space, origin bottom-left).
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub font: PdfFont,
    pub size: f32,
    pub x: f32,
    pub y: f32,
    pub text: String,
}

struct LineFormat {
    font: PdfFont,
    size: f32,
    leading: f32,
    indent: f32,
}

fn line_format(style: LineStyle) -> LineFormat {
    match style {
        LineStyle::Header => LineFormat {
            font: PdfFont::Bold,
            size: HEADER_SIZE,
            leading: HEADER_LEADING,
            indent: 0.0,
        },
        LineStyle::Bullet => LineFormat {
            font: PdfFont::Regular,
            size: BODY_SIZE,
            leading: BODY_LEADING,
            indent: BULLET_INDENT,
        },
        LineStyle::Body => LineFormat {
            font: PdfFont::Regular,
            size: BODY_SIZE,
            leading: BODY_LEADING,
            indent: 0.0,
        },
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layout
// ────────────────────────────────────────────────────────────────────────────

/// Places every line of `document`; returns one entry per page (always at least one).
pub fn layout(document: &StyledDocument) -> Vec<Vec<PlacedLine>> {
    let top = PAGE_HEIGHT - MARGIN;
    let mut pages: Vec<Vec<PlacedLine>> = vec![Vec::new()];
    let mut cursor = top;

    for (index, block) in document.blocks.iter().enumerate() {
        if index > 0 {
            cursor -= BLOCK_GAP;
        }
        for line in block {
            let format = line_format(line.style);
            let max_width = PAGE_WIDTH - 2.0 * MARGIN - format.indent;

            for wrapped in format.font.metrics().wrap(&line.text, format.size, max_width) {
                if cursor - format.leading < MARGIN {
                    pages.push(Vec::new());
                    cursor = top;
                }
                cursor -= format.leading;
                if let Some(page) = pages.last_mut() {
                    page.push(PlacedLine {
                        font: format.font,
                        size: format.size,
                        x: MARGIN + format.indent,
                        y: cursor,
                        text: wrapped,
                    });
                }
            }
        }
    }

    pages
}

// ────────────────────────────────────────────────────────────────────────────
// Encoding
// ────────────────────────────────────────────────────────────────────────────

/// Maps text to WinAnsiEncoding bytes. Unmappable characters become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\t' => b' ',
            '•' => 0x95,
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '–' => 0x96,
            '—' => 0x97,
            '\u{a0}'..='\u{ff}' => c as u8,
            _ => b'?',
        })
        .collect()
}

fn page_operations(lines: &[PlacedLine]) -> Vec<Operation> {
    lines
        .iter()
        .flat_map(|line| {
            [
                Operation::new("BT", vec![]),
                Operation::new(
                    "Tf",
                    vec![line.font.resource_name().into(), line.size.into()],
                ),
                Operation::new("Td", vec![line.x.into(), line.y.into()]),
                Operation::new(
                    "Tj",
                    vec![Object::String(
                        encode_win_ansi(&line.text),
                        StringFormat::Hexadecimal,
                    )],
                ),
                Operation::new("ET", vec![]),
            ]
        })
        .collect()
}

fn font_dictionary(font: PdfFont) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font.metrics().base_font,
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Encodes `document` as a complete PDF file.
pub fn write_pdf(document: &StyledDocument) -> Result<Vec<u8>> {
    let mut pdf = Document::with_version("1.5");
    let pages_id = pdf.new_object_id();

    let regular_id = pdf.add_object(font_dictionary(PdfFont::Regular));
    let bold_id = pdf.add_object(font_dictionary(PdfFont::Bold));
    let resources_id = pdf.add_object(dictionary! {
        "Font" => dictionary! {
            PdfFont::Regular.resource_name() => regular_id,
            PdfFont::Bold.resource_name() => bold_id,
        },
    });

    let pages = layout(document);
    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for lines in &pages {
        let content = Content {
            operations: page_operations(lines),
        };
        let content_id = pdf.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let media_box: Vec<Object> = vec![
        0.0_f32.into(),
        0.0_f32.into(),
        PAGE_WIDTH.into(),
        PAGE_HEIGHT.into(),
    ];
    let page_tree = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => pages.len() as i64,
        "Resources" => resources_id,
        "MediaBox" => media_box,
    };
    pdf.objects.insert(pages_id, Object::Dictionary(page_tree));

    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    pdf.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    pdf.save_to(&mut buffer)?;
    Ok(buffer)
}
