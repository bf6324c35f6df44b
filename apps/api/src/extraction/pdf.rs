//! PDF text-layer extraction via `pdf-extract`.
//!
//! Reading order within a page is whatever the text layer returns; multi-column layouts
//! are not re-ordered.

use anyhow::{Context, Result};

/// Separator placed between pages. A blank line doubles as a section boundary downstream.
pub const PAGE_BREAK: &str = "\n\n";

/// Extracts the text of every page (or only the first when `all_pages` is false).
pub fn extract_pdf_text(bytes: &[u8], all_pages: bool) -> Result<String> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .context("Failed to read PDF text layer")?;

    if all_pages {
        Ok(join_pages(&pages))
    } else {
        Ok(join_pages(&pages[..pages.len().min(1)]))
    }
}

/// Joins page texts with `PAGE_BREAK`, dropping pages with no text.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(|page| page.as_ref().trim_matches(|c| c == '\n' || c == '\r'))
        .filter(|page| !page.trim().is_empty())
        .collect::<Vec<_>>()
        .join(PAGE_BREAK)
}
