//! DOCX raw-text extraction: locate the main document part through `_rels/.rels`,
//! then linearize every `w:p` paragraph into one line.

use std::io::{Cursor, Read, Seek};

use anyhow::{Context, Result};
use roxmltree::Node;
use zip::ZipArchive;

const OFFICE_DOCUMENT_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const DEFAULT_DOCUMENT_PART: &str = "word/document.xml";

pub fn extract_docx_text(bytes: &[u8]) -> Result<String> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).context("Upload is not a valid DOCX archive")?;

    let part = main_document_part(&mut archive)?
        .unwrap_or_else(|| DEFAULT_DOCUMENT_PART.to_string());
    let xml = read_entry(&mut archive, &part)?;

    paragraphs_to_text(&xml)
}

/// Resolves the officeDocument relationship target, if the package declares one.
fn main_document_part<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Option<String>> {
    let rels = match read_entry(archive, "_rels/.rels") {
        Ok(rels) => rels,
        Err(_) => return Ok(None),
    };
    let rel_xml = roxmltree::Document::parse(&rels).context("Malformed _rels/.rels")?;

    let target = rel_xml
        .descendants()
        .filter(|node| node.has_tag_name("Relationship"))
        .find(|node| node.attribute("Type") == Some(OFFICE_DOCUMENT_REL))
        .and_then(|node| node.attribute("Target"))
        .map(|target| target.trim_start_matches('/').to_string());

    Ok(target)
}

fn read_entry<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<String> {
    let mut entry = archive
        .by_name(name)
        .with_context(|| format!("DOCX archive has no '{name}' part"))?;
    let mut buffer = String::new();
    entry
        .read_to_string(&mut buffer)
        .with_context(|| format!("DOCX part '{name}' is not valid UTF-8"))?;
    Ok(buffer)
}

/// One output line per paragraph; runs are concatenated, tabs and breaks preserved.
fn paragraphs_to_text(xml: &str) -> Result<String> {
    let doc = roxmltree::Document::parse(xml).context("Could not parse DOCX document XML")?;

    let lines: Vec<String> = doc
        .descendants()
        .filter(|node| node.has_tag_name("p"))
        .map(paragraph_text)
        .collect();

    Ok(lines.join("\n"))
}

fn paragraph_text(paragraph: Node<'_, '_>) -> String {
    paragraph
        .descendants()
        // nested paragraphs (text boxes) are emitted on their own
        .filter(|node| owning_paragraph(*node) == Some(paragraph))
        .fold(String::new(), |mut line, node| {
            if node.has_tag_name("t") {
                line.push_str(node.text().unwrap_or_default());
            } else if node.has_tag_name("tab") {
                line.push('\t');
            } else if node.has_tag_name("br") || node.has_tag_name("cr") {
                line.push('\n');
            }
            line
        })
}

fn owning_paragraph<'a, 'input>(node: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
    node.ancestors().skip(1).find(|a| a.has_tag_name("p"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

    fn build_docx(parts: &[(&str, &str)]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in parts {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    fn document(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        )
    }

    #[test]
    fn test_paragraphs_become_lines() {
        let xml = document(
            "<w:p><w:r><w:t>EXPERIENCE</w:t></w:r></w:p>\
             <w:p><w:r><w:t xml:space=\"preserve\">• Built </w:t></w:r><w:r><w:t>APIs</w:t></w:r></w:p>",
        );
        let bytes = build_docx(&[("_rels/.rels", RELS), ("word/document.xml", &xml)]);
        assert_eq!(extract_docx_text(&bytes).unwrap(), "EXPERIENCE\n• Built APIs");
    }

    #[test]
    fn test_empty_paragraphs_keep_blank_lines() {
        let xml = document(
            "<w:p><w:r><w:t>SUMMARY</w:t></w:r></w:p><w:p/><w:p><w:r><w:t>SKILLS</w:t></w:r></w:p>",
        );
        let bytes = build_docx(&[("_rels/.rels", RELS), ("word/document.xml", &xml)]);
        assert_eq!(extract_docx_text(&bytes).unwrap(), "SUMMARY\n\nSKILLS");
    }

    #[test]
    fn test_tabs_and_breaks_are_preserved() {
        let xml = document("<w:p><w:r><w:t>A</w:t><w:tab/><w:t>B</w:t><w:br/><w:t>C</w:t></w:r></w:p>");
        let bytes = build_docx(&[("_rels/.rels", RELS), ("word/document.xml", &xml)]);
        assert_eq!(extract_docx_text(&bytes).unwrap(), "A\tB\nC");
    }

    #[test]
    fn test_missing_rels_falls_back_to_default_part() {
        let xml = document("<w:p><w:r><w:t>EDUCATION</w:t></w:r></w:p>");
        let bytes = build_docx(&[("word/document.xml", &xml)]);
        assert_eq!(extract_docx_text(&bytes).unwrap(), "EDUCATION");
    }

    #[test]
    fn test_non_zip_input_is_an_error() {
        assert!(extract_docx_text(b"not a zip archive").is_err());
    }
}
