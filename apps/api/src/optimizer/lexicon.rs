//! Static lexicons used by keyword extraction, classification, and rewriting.
//!
//! Plain slices keep declaration order (which drives display order); the `Lazy` sets give
//! O(1) exact membership where order does not matter.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::optimizer::sections::SectionType;

/// Tokens dropped during job-description tokenization.
pub const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "with", "from", "have", "were", "this", "that", "these", "those",
    "they", "their", "there",
];

/// Generic resume / soft-skill terms added to every keyword set.
pub const COMMON_KEYWORDS: &[&str] = &[
    "experience",
    "skills",
    "education",
    "projects",
    "achievements",
    "development",
    "programming",
    "software",
    "engineering",
    "communication",
    "problem-solving",
    "team",
    "leadership",
    "management",
    "collaboration",
    "analysis",
    "design",
    "implementation",
    "documentation",
    "optimization",
    "performance",
    "strategy",
    "planning",
    "research",
    "innovation",
    "delivery",
    "stakeholder",
    "mentoring",
    "initiative",
    "organization",
    "presentation",
    "negotiation",
    "adaptability",
    "creativity",
    "teamwork",
    "reporting",
    "coordination",
    "process improvement",
    "customer service",
    "results",
];

/// Technical terms; only those literally present in the job description are added.
pub const TECHNICAL_KEYWORDS: &[&str] = &[
    "javascript",
    "python",
    "java",
    "c++",
    "sql",
    "html",
    "css",
    "react",
    "angular",
    "vue",
    "node.js",
    "express",
    "mongodb",
    "aws",
    "docker",
    "kubernetes",
    "git",
    "agile",
    "scrum",
    "machine learning",
    "data analysis",
    "cloud computing",
    "typescript",
    "next.js",
    "graphql",
    "rest api",
    "microservices",
    "ci/cd",
    "devops",
    "testing",
    "debugging",
    "code review",
    "web development",
    "mobile development",
    "database",
    "api",
    "frontend",
    "backend",
    "full stack",
    "ui/ux",
    "responsive design",
];

pub const SOFT_SKILLS: &[&str] = &[
    "leadership",
    "communication",
    "problem solving",
    "team",
    "management",
    "analytical",
    "creative",
    "organized",
    "detail-oriented",
    "results-driven",
    "innovative",
    "collaborative",
    "strategic",
    "efficient",
    "proactive",
    "responsible",
    "dedicated",
    "motivated",
    "self-starter",
    "team player",
    "attention to detail",
    "time management",
];

/// Verbs preferred when choosing which keywords to attach to experience bullets.
pub static ACHIEVEMENT_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["improved", "increased", "reduced", "achieved", "developed"]
        .into_iter()
        .collect()
});

pub static STOP_WORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOP_WORDS.iter().copied().collect());

/// Header line (trimmed, upper-cased, trailing colon removed) → section type.
pub const SECTION_HEADERS: &[(&str, SectionType)] = &[
    ("SUMMARY", SectionType::Summary),
    ("PROFESSIONAL SUMMARY", SectionType::Summary),
    ("OBJECTIVE", SectionType::Summary),
    ("CAREER OBJECTIVE", SectionType::Summary),
    ("PROFILE", SectionType::Summary),
    ("EXPERIENCE", SectionType::Experience),
    ("WORK EXPERIENCE", SectionType::Experience),
    ("PROFESSIONAL EXPERIENCE", SectionType::Experience),
    ("EMPLOYMENT HISTORY", SectionType::Experience),
    ("EDUCATION", SectionType::Education),
    ("SKILLS", SectionType::Skills),
    ("TECHNICAL SKILLS", SectionType::Skills),
    ("CORE COMPETENCIES", SectionType::Skills),
    ("ACHIEVEMENTS", SectionType::Achievements),
    ("ACCOMPLISHMENTS", SectionType::Achievements),
    ("AWARDS", SectionType::Achievements),
    ("CERTIFICATIONS", SectionType::Achievements),
    ("PROJECTS", SectionType::Projects),
    ("PERSONAL PROJECTS", SectionType::Projects),
    ("LANGUAGES", SectionType::Languages),
    ("PERSONAL INFORMATION", SectionType::Other),
    ("CONTACT", SectionType::Other),
    ("INTERESTS", SectionType::Other),
];

/// True when any technical lexicon entry is a substring of `keyword` ("apis", "reactjs").
///
/// `keyword` must already be lower-cased.
pub fn is_technical(keyword: &str) -> bool {
    TECHNICAL_KEYWORDS.iter().any(|term| keyword.contains(term))
}

/// Substring test against the soft-skill lexicon, so "teamwork" and "teams" match "team".
pub fn is_soft_skill(keyword: &str) -> bool {
    SOFT_SKILLS.iter().any(|term| keyword.contains(term))
}

pub fn is_achievement_word(keyword: &str) -> bool {
    ACHIEVEMENT_WORDS.contains(keyword)
}
