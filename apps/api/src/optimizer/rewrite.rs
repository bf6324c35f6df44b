//! Content Optimizer — injects missing keywords into each section with a type-specific
//! strategy.
//!
//! Every rewrite is additive and line-local: original lines are only ever extended, never
//! removed or reordered. This is literal keyword overlap, not semantic rewriting; injected
//! clauses are not checked for meaning.

use std::collections::HashSet;

use crate::optimizer::keywords::{Keyword, KeywordSet};
use crate::optimizer::lexicon::is_achievement_word;
use crate::optimizer::sections::{is_bullet, join_sections, Section, SectionType};

const SUMMARY_KEYWORDS_PER_CLAUSE: usize = 3;
const EXPERIENCE_KEYWORDS_PER_BULLET: usize = 2;
const PROJECT_KEYWORDS_PER_BULLET: usize = 2;
const MAX_SKILLS_ADDED_PER_LINE: usize = 5;

/// Rewrites every section and rejoins them with blank-line separators.
pub fn optimize(sections: &[Section], keywords: &KeywordSet) -> String {
    let rewritten: Vec<Section> = sections
        .iter()
        .map(|section| optimize_section(section, keywords))
        .collect();
    join_sections(&rewritten)
}

/// Returns a rewritten copy of `section`; the input is never mutated.
pub fn optimize_section(section: &Section, keywords: &KeywordSet) -> Section {
    match section.section_type {
        SectionType::Summary => rewrite_summary(section, keywords),
        SectionType::Experience => rewrite_experience(section, keywords),
        SectionType::Skills => rewrite_skills(section, keywords),
        SectionType::Achievements => rewrite_achievements(section, keywords),
        SectionType::Projects => rewrite_projects(section, keywords),
        SectionType::Education | SectionType::Languages | SectionType::Other => section.clone(),
    }
}

/// Keywords that are not a case-insensitive substring of `text`, in set order.
fn missing_from<'k>(text: &str, keywords: &'k KeywordSet) -> Vec<&'k Keyword> {
    let lowered = text.to_lowercase();
    keywords
        .iter()
        .filter(|keyword| !lowered.contains(keyword.text.as_str()))
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Summary
// ────────────────────────────────────────────────────────────────────────────

fn rewrite_summary(section: &Section, keywords: &KeywordSet) -> Section {
    let missing = missing_from(&section.prose(), keywords);
    if missing.is_empty() {
        return section.clone();
    }

    let mut ranked = missing.clone();
    ranked.sort_by_key(|keyword| !(keyword.is_technical() || keyword.is_soft()));

    let expertise = natural_list(
        ranked
            .iter()
            .take(SUMMARY_KEYWORDS_PER_CLAUSE)
            .map(|keyword| capitalize(&keyword.text)),
    );
    let track_record = natural_list(
        missing
            .iter()
            .take(SUMMARY_KEYWORDS_PER_CLAUSE)
            .map(|keyword| capitalize(&keyword.text)),
    );
    let addition = format!(
        "Demonstrated expertise in {expertise}. \
         Proven track record of delivering results through {track_record}."
    );

    let mut content = section.content.clone();
    match content.last_mut() {
        Some(last) if !is_bullet(last) => {
            last.push(' ');
            last.push_str(&addition);
        }
        _ => content.push(addition),
    }
    section.with_content(content)
}

// ────────────────────────────────────────────────────────────────────────────
// Bullet-based sections
// ────────────────────────────────────────────────────────────────────────────

fn rewrite_bullets<F>(section: &Section, mut rewrite: F) -> Section
where
    F: FnMut(&str) -> Option<String>,
{
    let content = section
        .content
        .iter()
        .map(|line| {
            if is_bullet(line) {
                rewrite(line).unwrap_or_else(|| line.clone())
            } else {
                line.clone()
            }
        })
        .collect();
    section.with_content(content)
}

fn rewrite_experience(section: &Section, keywords: &KeywordSet) -> Section {
    rewrite_bullets(section, |bullet| {
        let mut missing = missing_from(bullet, keywords);
        missing.sort_by_key(|keyword| {
            !(keyword.is_technical() || is_achievement_word(&keyword.text))
        });
        let picks: Vec<&str> = missing
            .iter()
            .take(EXPERIENCE_KEYWORDS_PER_BULLET)
            .map(|keyword| keyword.text.as_str())
            .collect();
        (!picks.is_empty()).then(|| format!("{bullet} utilizing {}", picks.join(" and ")))
    })
}

fn rewrite_achievements(section: &Section, keywords: &KeywordSet) -> Section {
    rewrite_bullets(section, |bullet| {
        missing_from(bullet, keywords)
            .first()
            .map(|keyword| format!("{bullet} using {}", keyword.text))
    })
}

fn rewrite_projects(section: &Section, keywords: &KeywordSet) -> Section {
    rewrite_bullets(section, |bullet| {
        let picks: Vec<&str> = missing_from(bullet, keywords)
            .into_iter()
            .filter(|keyword| keyword.is_technical())
            .take(PROJECT_KEYWORDS_PER_BULLET)
            .map(|keyword| keyword.text.as_str())
            .collect();
        (!picks.is_empty()).then(|| format!("{bullet} using {}", picks.join(" and ")))
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkillLine {
    Technical,
    Soft,
}

fn skill_line_kind(line: &str) -> Option<SkillLine> {
    let lowered = line.to_lowercase();
    if lowered.contains("technical") {
        Some(SkillLine::Technical)
    } else if lowered.contains("soft") {
        Some(SkillLine::Soft)
    } else {
        None
    }
}

/// Technical lines are filled before soft lines; no keyword is added twice per section.
fn rewrite_skills(section: &Section, keywords: &KeywordSet) -> Section {
    let missing = missing_from(&section.prose(), keywords);
    let mut added: HashSet<&str> = HashSet::new();
    let mut content = section.content.clone();

    for kind in [SkillLine::Technical, SkillLine::Soft] {
        for line in content.iter_mut() {
            if skill_line_kind(line) != Some(kind) {
                continue;
            }
            let candidates = missing.iter().copied().filter(|keyword| match kind {
                SkillLine::Technical => keyword.is_technical(),
                SkillLine::Soft => keyword.is_soft(),
            });
            if let Some(rewritten) = extend_skill_line(line, candidates, &mut added) {
                *line = rewritten;
            }
        }
    }

    section.with_content(content)
}

/// Splits `"<label>: a, b"` into the label and its items.
fn split_skill_line(line: &str) -> (&str, Vec<String>) {
    match line.split_once(':') {
        Some((label, list)) => (
            label.trim(),
            list.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(String::from)
                .collect(),
        ),
        None => (line.trim(), Vec::new()),
    }
}

fn extend_skill_line<'k>(
    line: &str,
    candidates: impl Iterator<Item = &'k Keyword>,
    added: &mut HashSet<&'k str>,
) -> Option<String> {
    let (label, mut items) = split_skill_line(line);
    let mut count = 0;

    for keyword in candidates {
        if count == MAX_SKILLS_ADDED_PER_LINE {
            break;
        }
        if added.contains(keyword.text.as_str()) || items.contains(&keyword.text) {
            continue;
        }
        items.push(keyword.text.clone());
        added.insert(keyword.text.as_str());
        count += 1;
    }

    (count > 0).then(|| format!("{label}: {}", items.join(", ")))
}

// ────────────────────────────────────────────────────────────────────────────
// Text helpers
// ────────────────────────────────────────────────────────────────────────────

/// Upper-cases the first character only.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `a`, `a and b`, `a, b and c`.
fn natural_list(items: impl Iterator<Item = String>) -> String {
    let items: Vec<String> = items.collect();
    match items.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimizer::sections::parse_sections;

    fn section(section_type: SectionType, lines: &[&str]) -> Section {
        Section::new("TITLE", section_type)
            .with_content(lines.iter().map(|l| l.to_string()).collect())
    }

    fn keywords(terms: &[&str]) -> KeywordSet {
        KeywordSet::from_terms(terms)
    }

    #[test]
    fn test_summary_appends_two_capitalized_clauses() {
        let s = section(
            SectionType::Summary,
            &["Backend engineer with experience shipping services."],
        );
        let out = optimize_section(&s, &keywords(&["experience", "python", "leadership", "teamwork"]));
        assert_eq!(
            out.content,
            vec![
                "Backend engineer with experience shipping services. \
                 Demonstrated expertise in Python, Leadership and Teamwork. \
                 Proven track record of delivering results through Python, Leadership and Teamwork."
            ]
        );
    }

    #[test]
    fn test_summary_ranks_technical_and_soft_first() {
        let s = section(SectionType::Summary, &["Engineer."]);
        let out = optimize_section(
            &s,
            &keywords(&["experience", "results", "python", "leadership", "aws"]),
        );
        let text = out.to_text();
        assert!(text.contains("Demonstrated expertise in Python, Leadership and Aws."));
        assert!(text.contains("through Experience, Results and Python."));
    }

    #[test]
    fn test_summary_after_bullets_gets_its_own_line() {
        let s = section(SectionType::Summary, &["• Rust engineer"]);
        let out = optimize_section(&s, &keywords(&["python"]));
        assert_eq!(out.content.len(), 2);
        assert_eq!(out.content[0], "• Rust engineer");
        assert!(out.content[1].starts_with("Demonstrated expertise in Python."));
    }

    #[test]
    fn test_summary_unchanged_when_nothing_missing() {
        let s = section(SectionType::Summary, &["Python developer focused on leadership"]);
        let out = optimize_section(&s, &keywords(&["python", "leadership"]));
        assert_eq!(out, s);
    }

    #[test]
    fn test_experience_prioritizes_technical_and_achievement_words() {
        let s = section(
            SectionType::Experience,
            &["Acme Corp | 2020 - 2023", "• Cut latency by 40%"],
        );
        let out = optimize_section(&s, &keywords(&["teamwork", "python", "reduced", "aws"]));
        assert_eq!(out.content[0], "Acme Corp | 2020 - 2023");
        assert_eq!(
            out.content[1],
            "• Cut latency by 40% utilizing python and reduced"
        );
    }

    #[test]
    fn test_experience_single_missing_keyword() {
        let s = section(SectionType::Experience, &["• Wrote python services"]);
        let out = optimize_section(&s, &keywords(&["python", "docker"]));
        assert_eq!(out.content[0], "• Wrote python services utilizing docker");
    }

    #[test]
    fn test_skills_routes_keywords_by_line_label() {
        let s = section(
            SectionType::Skills,
            &["Technical Skills: Rust, Python", "Soft Skills: Communication"],
        );
        let out = optimize_section(
            &s,
            &keywords(&["python", "aws", "docker", "leadership", "communication", "teamwork"]),
        );
        assert_eq!(
            out.content,
            vec![
                "Technical Skills: Rust, Python, aws, docker",
                "Soft Skills: Communication, leadership, teamwork",
            ]
        );
    }

    #[test]
    fn test_skills_adds_at_most_five_per_line() {
        let s = section(SectionType::Skills, &["Technical: Rust"]);
        let out = optimize_section(
            &s,
            &keywords(&["python", "java", "sql", "aws", "docker", "kubernetes", "graphql"]),
        );
        assert_eq!(
            out.content[0],
            "Technical: Rust, python, java, sql, aws, docker"
        );
    }

    #[test]
    fn test_skills_never_adds_a_keyword_twice() {
        let s = section(
            SectionType::Skills,
            &["Technical: Rust", "Technical tools: Vim"],
        );
        let out = optimize_section(&s, &keywords(&["python"]));
        assert_eq!(out.content[0], "Technical: Rust, python");
        assert_eq!(out.content[1], "Technical tools: Vim");
    }

    #[test]
    fn test_skills_unlabelled_lines_pass_through() {
        let s = section(SectionType::Skills, &["Rust, Go, SQL"]);
        let out = optimize_section(&s, &keywords(&["python"]));
        assert_eq!(out, s);
    }

    #[test]
    fn test_achievements_append_first_missing_keyword() {
        let s = section(
            SectionType::Achievements,
            &["• Won hackathon", "Dean's list", "• Led python guild"],
        );
        let out = optimize_section(&s, &keywords(&["python", "leadership"]));
        assert_eq!(
            out.content,
            vec![
                "• Won hackathon using python",
                "Dean's list",
                "• Led python guild using leadership",
            ]
        );
    }

    #[test]
    fn test_projects_append_only_technical_keywords() {
        let s = section(SectionType::Projects, &["• Chat app", "• Python scraper"]);
        let out = optimize_section(&s, &keywords(&["python", "teamwork", "aws", "docker"]));
        assert_eq!(
            out.content,
            vec![
                "• Chat app using python and aws",
                "• Python scraper using aws and docker",
            ]
        );
    }

    #[test]
    fn test_projects_without_missing_technical_terms_unchanged() {
        let s = section(SectionType::Projects, &["• Chat app"]);
        let out = optimize_section(&s, &keywords(&["teamwork"]));
        assert_eq!(out, s);
    }

    #[test]
    fn test_pass_through_section_types() {
        let kws = keywords(&["python"]);
        for section_type in [SectionType::Education, SectionType::Languages, SectionType::Other] {
            let s = section(section_type, &["• BS Computer Science"]);
            assert_eq!(optimize_section(&s, &kws), s);
        }
    }

    #[test]
    fn test_rewrites_are_additive() {
        let text = "SUMMARY\nEngineer\nEXPERIENCE\n• Built APIs\nPROJECTS\n• CLI tool\nACHIEVEMENTS\n• Award";
        let sections = parse_sections(text);
        let kws = keywords(&["python", "aws", "leadership"]);
        for original in &sections {
            let rewritten = optimize_section(original, &kws);
            assert_eq!(rewritten.content.len(), original.content.len());
            for (before, after) in original.content.iter().zip(&rewritten.content) {
                assert!(after.starts_with(before.as_str()), "{after} lost {before}");
            }
        }
    }

    #[test]
    fn test_reoptimizing_complete_section_appends_nothing() {
        let kws = keywords(&["python", "leadership"]);
        for section_type in [
            SectionType::Summary,
            SectionType::Experience,
            SectionType::Skills,
            SectionType::Achievements,
            SectionType::Projects,
        ] {
            let s = section(section_type, &["• Python work", "Technical: Rust"]);
            let once = optimize_section(&s, &kws);
            let once_text = once.to_text().to_lowercase();
            if kws.iter().all(|k| once_text.contains(k.text.as_str())) {
                assert_eq!(optimize_section(&once, &kws), once);
            }
        }
        // Summary always ends up covering a small keyword set after one pass.
        let summary = optimize_section(&section(SectionType::Summary, &["Engineer"]), &kws);
        assert_eq!(optimize_section(&summary, &kws), summary);
    }

    #[test]
    fn test_optimize_joins_sections_with_blank_lines() {
        let sections = parse_sections("EDUCATION\nBS CS\nLANGUAGES\nEnglish");
        assert_eq!(
            optimize(&sections, &keywords(&["python"])),
            "EDUCATION\nBS CS\n\nLANGUAGES\nEnglish"
        );
    }

    #[test]
    fn test_natural_list_forms() {
        let list = |items: &[&str]| natural_list(items.iter().map(|s| s.to_string()));
        assert_eq!(list(&[]), "");
        assert_eq!(list(&["A"]), "A");
        assert_eq!(list(&["A", "B"]), "A and B");
        assert_eq!(list(&["A", "B", "C"]), "A, B and C");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("node.js"), "Node.js");
        assert_eq!(capitalize(""), "");
    }
}
