//! Section Parser — segments extracted resume text into typed sections.
//!
//! The "currently open section" lives in an explicit accumulator folded over the lines.
//! A header line closes the open section and starts a new one; content before the first
//! header goes to an implicit OTHER section.

use serde::Serialize;

use crate::optimizer::lexicon::SECTION_HEADERS;

/// Canonical bullet prefix.
pub const BULLET: &str = "• ";

const BULLET_MARKERS: &[char] = &['-', '•', '*'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    Summary,
    Experience,
    Education,
    Skills,
    Achievements,
    Projects,
    Languages,
    Other,
}

/// A titled, typed, contiguous block of resume lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub section_type: SectionType,
    pub content: Vec<String>,
    /// Synthesized for content that precedes any header; its title is never emitted.
    pub implicit: bool,
}

impl Section {
    pub fn new(title: impl Into<String>, section_type: SectionType) -> Self {
        Self {
            title: title.into(),
            section_type,
            content: Vec::new(),
            implicit: false,
        }
    }

    fn implicit_other() -> Self {
        Self {
            implicit: true,
            ..Self::new("OTHER", SectionType::Other)
        }
    }

    /// Replaces the content, keeping title and type.
    pub fn with_content(&self, content: Vec<String>) -> Self {
        Self {
            content,
            ..self.clone()
        }
    }

    /// Title (unless implicit) followed by the content lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        let title = (!self.implicit).then_some(self.title.as_str());
        title
            .into_iter()
            .chain(self.content.iter().map(String::as_str))
    }

    pub fn to_text(&self) -> String {
        self.lines().collect::<Vec<_>>().join("\n")
    }

    /// Content lines joined with spaces, for prose-level keyword tests.
    pub fn prose(&self) -> String {
        self.content.join(" ")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Line helpers
// ────────────────────────────────────────────────────────────────────────────

/// Maps a header line to its section type. Case-insensitive; one trailing colon allowed.
pub fn header_type(line: &str) -> Option<SectionType> {
    let upper = line.trim().to_uppercase();
    let key = upper.strip_suffix(':').unwrap_or(&upper).trim_end();
    SECTION_HEADERS
        .iter()
        .find(|(header, _)| *header == key)
        .map(|(_, section_type)| *section_type)
}

pub fn is_bullet(line: &str) -> bool {
    line.starts_with(BULLET)
}

/// Trims, collapses whitespace runs, and rewrites `-`, `•`, `*` prefixes as `• `.
pub fn normalize_line(line: &str) -> String {
    let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");

    let Some(rest) = collapsed.strip_prefix(BULLET_MARKERS) else {
        return collapsed;
    };
    let rest = rest.trim_start();
    // rules like "-----" are content, not bullets
    if rest.chars().all(|c| BULLET_MARKERS.contains(&c)) {
        return collapsed;
    }
    format!("{BULLET}{rest}")
}

// ────────────────────────────────────────────────────────────────────────────
// Parser
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct ParseState {
    closed: Vec<Section>,
    open: Option<Section>,
}

impl ParseState {
    fn push_line(mut self, line: &str) -> Self {
        if line.trim().is_empty() {
            return self;
        }

        if let Some(section_type) = header_type(line) {
            self.closed.extend(self.open.take());
            self.open = Some(Section::new(normalize_line(line), section_type));
            return self;
        }

        self.open
            .get_or_insert_with(Section::implicit_other)
            .content
            .push(normalize_line(line));
        self
    }

    fn finish(mut self) -> Vec<Section> {
        self.closed.extend(self.open.take());
        self.closed
    }
}

/// Parses resume text into sections in source order. Total.
pub fn parse_sections(text: &str) -> Vec<Section> {
    text.lines()
        .fold(ParseState::default(), ParseState::push_line)
        .finish()
}

/// Rejoins sections with a blank line between each.
pub fn join_sections(sections: &[Section]) -> String {
    sections
        .iter()
        .map(Section::to_text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}
