//! Keyword Extractor — turns free-form job-description text into a deduplicated,
//! weight-classified keyword set.
//!
//! Algorithm:
//! 1. Whitespace tokens longer than 3 chars that are not stop words
//! 2. `.`/`,`-delimited phrases longer than 5 chars that contain neither "and" nor "the"
//! 3. The common lexicon, unconditionally
//! 4. Technical lexicon terms that appear anywhere in the description
//!
//! Insertion order is kept for display only; callers must not depend on it.

use std::collections::HashSet;

use serde::Serialize;

use crate::optimizer::lexicon::{
    is_soft_skill, is_technical, COMMON_KEYWORDS, STOP_WORD_SET, TECHNICAL_KEYWORDS,
};

/// Characters stripped from either end of a token before it is considered.
const TOKEN_PUNCTUATION: &[char] = &[
    ',', '.', ';', ':', '!', '?', '(', ')', '[', ']', '"', '\'',
];

const MIN_TOKEN_CHARS: usize = 4;
const MIN_PHRASE_CHARS: usize = 6;

// ────────────────────────────────────────────────────────────────────────────
// Weight classes
// ────────────────────────────────────────────────────────────────────────────

/// Controls scoring contribution and rewrite priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightClass {
    Technical,
    Phrase,
    Soft,
    Common,
}

impl WeightClass {
    /// Technical wins over phrase, phrase over soft, soft over common.
    pub fn classify(keyword: &str) -> Self {
        if is_technical(keyword) {
            WeightClass::Technical
        } else if keyword.contains(' ') {
            WeightClass::Phrase
        } else if is_soft_skill(keyword) {
            WeightClass::Soft
        } else {
            WeightClass::Common
        }
    }

    pub fn weight(self) -> f64 {
        match self {
            WeightClass::Technical => 3.0,
            WeightClass::Phrase => 2.5,
            WeightClass::Soft => 2.0,
            WeightClass::Common => 1.5,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Keyword + set
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    pub text: String,
    pub class: WeightClass,
}

impl Keyword {
    /// Normalizes `raw`; returns `None` when nothing is left.
    pub fn new(raw: &str) -> Option<Self> {
        let text = normalize(raw);
        if text.is_empty() {
            return None;
        }
        let class = WeightClass::classify(&text);
        Some(Keyword { text, class })
    }

    pub fn weight(&self) -> f64 {
        self.class.weight()
    }

    pub fn is_technical(&self) -> bool {
        self.class == WeightClass::Technical
    }

    /// True for terms that are (or contain) a soft-skill lexicon entry, whatever their class.
    pub fn is_soft(&self) -> bool {
        self.class == WeightClass::Soft || (!self.is_technical() && is_soft_skill(&self.text))
    }
}

/// Lower-case, trim, collapse internal whitespace.
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Keywords deduplicated on their normalized text, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct KeywordSet {
    keywords: Vec<Keyword>,
    seen: HashSet<String>,
}

impl KeywordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from literal terms (normalized, deduplicated).
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for term in terms {
            set.insert(term.as_ref());
        }
        set
    }

    /// Returns `true` when the keyword was not already present.
    pub fn insert(&mut self, raw: &str) -> bool {
        let Some(keyword) = Keyword::new(raw) else {
            return false;
        };
        if !self.seen.insert(keyword.text.clone()) {
            return false;
        }
        self.keywords.push(keyword);
        true
    }

    #[cfg(test)]
    pub fn contains(&self, raw: &str) -> bool {
        self.seen.contains(&normalize(raw))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Keyword> {
        self.keywords.iter()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn texts(&self) -> Vec<String> {
        self.keywords.iter().map(|k| k.text.clone()).collect()
    }
}

impl<'a> IntoIterator for &'a KeywordSet {
    type Item = &'a Keyword;
    type IntoIter = std::slice::Iter<'a, Keyword>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Extraction
// ────────────────────────────────────────────────────────────────────────────

/// Extracts candidate keywords from a job description. Total: empty input yields the
/// common lexicon.
pub fn extract_keywords(job_description: &str) -> KeywordSet {
    let lowered = job_description.to_lowercase();
    let mut set = KeywordSet::new();

    for token in lowered.split_whitespace() {
        let token = token.trim_matches(TOKEN_PUNCTUATION);
        if token.chars().count() >= MIN_TOKEN_CHARS && !STOP_WORD_SET.contains(token) {
            set.insert(token);
        }
    }

    for phrase in lowered.split(['.', ',']) {
        let phrase = normalize(phrase);
        // Coarse on purpose: "brand management" is dropped because "brand" contains "and".
        if phrase.chars().count() >= MIN_PHRASE_CHARS
            && !phrase.contains("and")
            && !phrase.contains("the")
        {
            set.insert(&phrase);
        }
    }

    for term in COMMON_KEYWORDS {
        set.insert(term);
    }

    for term in TECHNICAL_KEYWORDS {
        if lowered.contains(term) {
            set.insert(term);
        }
    }

    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_description_yields_exactly_common_lexicon() {
        let set = extract_keywords("");
        assert_eq!(set.texts(), COMMON_KEYWORDS.to_vec());
    }

    #[test]
    fn test_whitespace_only_description_yields_common_lexicon() {
        assert_eq!(extract_keywords("   \n\t").len(), COMMON_KEYWORDS.len());
    }

    #[test]
    fn test_tokens_filter_short_and_stop_words() {
        let set = extract_keywords("We want their Rust and Go skills");
        assert!(set.contains("want"));
        assert!(set.contains("rust"));
        assert!(!set.contains("their"));
        assert!(!set.contains("go"));
        assert!(!set.contains("and"));
    }

    #[test]
    fn test_tokens_lose_surrounding_punctuation() {
        let set = extract_keywords("Experience with Kubernetes, Terraform.");
        assert!(set.contains("kubernetes"));
        assert!(set.contains("terraform"));
        assert!(!set.contains("kubernetes,"));
    }

    #[test]
    fn test_phrases_are_split_on_sentence_punctuation() {
        let set = extract_keywords("Distributed systems design, Observability tooling.");
        assert!(set.contains("distributed systems design"));
        assert!(set.contains("observability tooling"));
    }

    #[test]
    fn test_phrase_filter_drops_substring_matches_of_and_the() {
        // Known coarse heuristic: "brand" contains "and", "other" contains "the".
        let set = extract_keywords("Brand management, Other duties");
        assert!(!set.contains("brand management"));
        assert!(!set.contains("other duties"));
        // Individual tokens still survive.
        assert!(set.contains("brand"));
        assert!(set.contains("management"));
    }

    #[test]
    fn test_technical_terms_require_literal_presence() {
        let set = extract_keywords("Build microservices in Python on AWS");
        assert!(set.contains("python"));
        assert!(set.contains("microservices"));
        assert!(set.contains("aws"));
        assert!(!set.contains("kubernetes"));
    }

    #[test]
    fn test_technical_substring_filter_is_literal() {
        // "digital" contains "git" as a substring, so the lexicon term is added.
        let set = extract_keywords("Digital marketing lead");
        assert!(set.contains("git"));
    }

    #[test]
    fn test_deduplicates_on_normalized_text() {
        let mut set = KeywordSet::new();
        assert!(set.insert("Python"));
        assert!(!set.insert("  python "));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_classification_precedence() {
        assert_eq!(WeightClass::classify("python"), WeightClass::Technical);
        assert_eq!(WeightClass::classify("machine learning"), WeightClass::Technical);
        assert_eq!(WeightClass::classify("distributed systems"), WeightClass::Phrase);
        assert_eq!(WeightClass::classify("leadership"), WeightClass::Soft);
        assert_eq!(WeightClass::classify("experience"), WeightClass::Common);
    }

    #[test]
    fn test_classification_matches_lexicon_substrings() {
        assert_eq!(WeightClass::classify("apis"), WeightClass::Technical);
        assert_eq!(WeightClass::classify("reactjs"), WeightClass::Technical);
        assert_eq!(WeightClass::classify("teamwork"), WeightClass::Soft);
        assert_eq!(WeightClass::classify("teams"), WeightClass::Soft);
        assert_eq!(Keyword::new("APIs").unwrap().weight(), 3.0);
    }

    #[test]
    fn test_weights() {
        assert_eq!(WeightClass::Technical.weight(), 3.0);
        assert_eq!(WeightClass::Phrase.weight(), 2.5);
        assert_eq!(WeightClass::Soft.weight(), 2.0);
        assert_eq!(WeightClass::Common.weight(), 1.5);
    }

    #[test]
    fn test_phrase_with_soft_term_counts_as_soft_for_rewrites() {
        let keyword = Keyword::new("time management").unwrap();
        assert_eq!(keyword.class, WeightClass::Phrase);
        assert!(keyword.is_soft());
    }
}
