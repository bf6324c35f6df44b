//! ATS Scorer — weighted keyword coverage with a density bonus and a coverage floor.
//!
//! Algorithm:
//! 1. Full weight for every keyword that is a case-insensitive substring of the text
//! 2. Partial credit (80%) for absent multi-word technical keywords when any of their
//!    words appears
//! 3. Base score = matched / total × 100
//! 4. Density = matched weight per 100 words; above 2 it earns a bonus of up to 10
//! 5. Matching more than 70% of the total weight floors the score at 80
//! 6. Round and clamp to 0..=100

use serde::Serialize;

use crate::optimizer::keywords::{Keyword, KeywordSet};

const PARTIAL_CREDIT: f64 = 0.8;
const DENSITY_THRESHOLD: f64 = 2.0;
const DENSITY_BONUS_FACTOR: f64 = 2.0;
const MAX_DENSITY_BONUS: f64 = 10.0;
const FLOOR_COVERAGE: f64 = 0.7;
const FLOOR_SCORE: f64 = 80.0;

/// Full breakdown behind a score, useful for explaining it to users.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreReport {
    pub score: u8,
    pub matched_weight: f64,
    pub total_weight: f64,
    pub keyword_density: f64,
    pub density_bonus: f64,
    pub matched: Vec<String>,
    pub partial: Vec<String>,
    pub missing: Vec<String>,
}

/// Pluggable scoring strategy. The default is [`KeywordAtsScorer`].
pub trait AtsScorer: Send + Sync {
    fn score(&self, text: &str, keywords: &KeywordSet) -> ScoreReport;

    /// Short identifier, surfaced in logs.
    fn backend(&self) -> &'static str;
}

pub struct KeywordAtsScorer;

impl AtsScorer for KeywordAtsScorer {
    fn score(&self, text: &str, keywords: &KeywordSet) -> ScoreReport {
        score_report(text, keywords)
    }

    fn backend(&self) -> &'static str {
        "keyword"
    }
}

enum Coverage {
    Full,
    Partial,
    Missing,
}

fn coverage(lowered_text: &str, keyword: &Keyword) -> Coverage {
    if lowered_text.contains(keyword.text.as_str()) {
        return Coverage::Full;
    }
    let words: Vec<&str> = keyword.text.split_whitespace().collect();
    if keyword.is_technical()
        && words.len() > 1
        && words.iter().any(|word| lowered_text.contains(word))
    {
        return Coverage::Partial;
    }
    Coverage::Missing
}

/// Scores `text` against `keywords`. Total: empty text or an empty set scores 0.
pub fn score_report(text: &str, keywords: &KeywordSet) -> ScoreReport {
    if keywords.is_empty() {
        return ScoreReport::default();
    }
    let lowered = text.to_lowercase();

    let mut matched_weight = 0.0;
    let mut total_weight = 0.0;
    let mut matched = Vec::new();
    let mut partial = Vec::new();
    let mut missing = Vec::new();

    for keyword in keywords {
        let weight = keyword.weight();
        total_weight += weight;
        match coverage(&lowered, keyword) {
            Coverage::Full => {
                matched_weight += weight;
                matched.push(keyword.text.clone());
            }
            Coverage::Partial => {
                matched_weight += weight * PARTIAL_CREDIT;
                partial.push(keyword.text.clone());
            }
            Coverage::Missing => missing.push(keyword.text.clone()),
        }
    }

    let mut score = if total_weight > 0.0 {
        matched_weight / total_weight * 100.0
    } else {
        0.0
    };

    let word_count = text.split_whitespace().count();
    let keyword_density = if word_count > 0 {
        matched_weight / (word_count as f64 / 100.0)
    } else {
        0.0
    };

    let density_bonus = if keyword_density > DENSITY_THRESHOLD {
        ((keyword_density - DENSITY_THRESHOLD) * DENSITY_BONUS_FACTOR).min(MAX_DENSITY_BONUS)
    } else {
        0.0
    };
    score += density_bonus;

    if total_weight > 0.0 && matched_weight > total_weight * FLOOR_COVERAGE {
        score = score.max(FLOOR_SCORE);
    }

    ScoreReport {
        score: score.round().clamp(0.0, 100.0) as u8,
        matched_weight,
        total_weight,
        keyword_density,
        density_bonus,
        matched,
        partial,
        missing,
    }
}
