//! Keyword-heuristic page analysis. Deterministic and offline.

use once_cell::sync::Lazy;
use regex::Regex;

use super::vocabulary::{self, AI_TERMS, CONSULTING_TERMS};
use super::{PageAnalysis, PageInput, PageIntent, PageType};

const TITLE_SCAN_LINES: usize = 5;
const MAX_KEY_MESSAGES: usize = 3;
const MAX_KEYWORDS: usize = 10;
const MAX_CONFIDENCE: f64 = 0.95;
const SUMMARY_CHARS: usize = 200;

static BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[-*•·▪●○■□◆▶>]+\s*|\d{1,2}[.)]\s+)").unwrap());

const TOC_MARKERS: &[&str] = &["table of contents", "contents", "agenda", "목차"];
const SUMMARY_MARKERS: &[&str] = &["executive summary", "summary", "요약", "개요"];
const DECIDE_MARKERS: &[&str] = &[
    "decision",
    "approve",
    "approval",
    "next steps",
    "의사결정",
    "승인",
];
const PERSUADE_MARKERS: &[&str] = &[
    "recommend",
    "should",
    "propose",
    "opportunity",
    "benefit",
    "제안",
    "권고",
    "기대 효과",
];

/// Analyze a page with heuristics only. Never fails, even on empty text.
pub fn analyze(input: &PageInput) -> PageAnalysis {
    let lines = clean_lines(&input.text);
    let lower = input.text.to_lowercase();

    let title = pick_title(&lines)
        .unwrap_or_else(|| format!("{} - Page {}", input.document_title, input.page_number));
    let subtitle = lines
        .iter()
        .take(TITLE_SCAN_LINES)
        .find(|l| **l != title && (3..=80).contains(&l.chars().count()))
        .cloned()
        .unwrap_or_default();

    let mut key_messages: Vec<String> = lines
        .iter()
        .filter(|l| l.chars().count() > 20)
        .take(MAX_KEY_MESSAGES)
        .cloned()
        .collect();
    if key_messages.is_empty() {
        key_messages.push(format!(
            "Page {} of {}: {}",
            input.page_number, input.document_title, title
        ));
    }

    let ai_keywords = vocabulary::find_terms(&input.text, AI_TERMS);
    let consulting_insights = vocabulary::find_terms(&input.text, CONSULTING_TERMS);
    let mut keywords: Vec<String> = Vec::new();
    for term in ai_keywords.iter().chain(consulting_insights.iter()) {
        if keywords.len() == MAX_KEYWORDS {
            break;
        }
        if !keywords.contains(term) {
            keywords.push(term.clone());
        }
    }

    let summary = truncate_chars(&key_messages.join(" "), SUMMARY_CHARS);

    PageAnalysis {
        title,
        subtitle,
        page_type: classify_page(input.page_number, &lower),
        intent: classify_intent(&lower),
        summary,
        key_messages,
        keywords,
        ai_keywords,
        consulting_insights,
        confidence: confidence_for(&input.text),
    }
}

/// Trimmed non-empty lines with list bullets removed.
pub fn clean_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|l| BULLET.replace(l.trim(), "").trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

fn pick_title(lines: &[String]) -> Option<String> {
    lines
        .iter()
        .take(TITLE_SCAN_LINES)
        .find(|l| (3..=60).contains(&l.chars().count()))
        .cloned()
}

fn classify_page(page_number: u32, lower: &str) -> PageType {
    if page_number == 1 {
        PageType::Cover
    } else if TOC_MARKERS.iter().any(|m| lower.contains(m)) {
        PageType::Toc
    } else if SUMMARY_MARKERS.iter().any(|m| lower.contains(m)) {
        PageType::Summary
    } else {
        PageType::Content
    }
}

fn classify_intent(lower: &str) -> PageIntent {
    if DECIDE_MARKERS.iter().any(|m| lower.contains(m)) {
        PageIntent::Decide
    } else if PERSUADE_MARKERS.iter().any(|m| lower.contains(m)) {
        PageIntent::Persuade
    } else {
        PageIntent::Inform
    }
}

/// Grows with the amount of text, capped at 0.95.
pub fn confidence_for(text: &str) -> f64 {
    (0.3 + text.chars().count() as f64 / 1000.0).min(MAX_CONFIDENCE)
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(text: &str, page_number: u32) -> PageInput {
        PageInput {
            text: text.into(),
            page_number,
            document_title: "Board Deck".into(),
            document_context: String::new(),
        }
    }

    #[test]
    fn test_empty_page_is_complete() {
        let analysis = analyze(&page("", 4));
        assert_eq!(analysis.title, "Board Deck - Page 4");
        assert_eq!(analysis.subtitle, "");
        assert_eq!(analysis.key_messages.len(), 1);
        assert!(analysis.ai_keywords.is_empty());
        assert_eq!(analysis.page_type, PageType::Content);
        assert_eq!(analysis.intent, PageIntent::Inform);
        assert!((0.0..=MAX_CONFIDENCE).contains(&analysis.confidence));
    }

    #[test]
    fn test_title_skips_short_and_long_lines() {
        let long = "x".repeat(81);
        let text = format!(
            "A\n{}\n- Market Context\nAI adoption is accelerating across the region",
            long
        );
        let analysis = analyze(&page(&text, 2));
        assert_eq!(analysis.title, "Market Context");
        assert_eq!(analysis.subtitle, "AI adoption is accelerating across the region");
    }

    #[test]
    fn test_key_messages_take_first_three_long_lines() {
        let text = [
            "Title",
            "first long line with plenty of words",
            "short",
            "second long line with plenty of words",
            "third long line with plenty of words",
            "fourth long line with plenty of words",
        ]
        .join("\n");
        let analysis = analyze(&page(&text, 2));
        assert_eq!(analysis.key_messages.len(), 3);
        assert!(analysis.key_messages[2].starts_with("third"));
    }

    #[test]
    fn test_classification() {
        assert_eq!(analyze(&page("목차\n1. 개요", 2)).page_type, PageType::Toc);
        assert_eq!(analyze(&page("Executive Summary", 3)).page_type, PageType::Summary);
        assert_eq!(analyze(&page("Executive Summary", 1)).page_type, PageType::Cover);
        assert_eq!(analyze(&page("Next Steps and approval", 9)).intent, PageIntent::Decide);
        assert_eq!(analyze(&page("We recommend a pilot", 9)).intent, PageIntent::Persuade);
    }

    #[test]
    fn test_confidence_grows_and_caps() {
        assert!((confidence_for("") - 0.3).abs() < 1e-9);
        assert!((confidence_for(&"a".repeat(200)) - 0.5).abs() < 1e-9);
        assert_eq!(confidence_for(&"a".repeat(5000)), MAX_CONFIDENCE);
    }

    #[test]
    fn test_keywords_merge_vocabularies() {
        let analysis = analyze(&page("Generative AI roadmap and governance", 5));
        assert!(analysis.ai_keywords.contains(&"Generative AI".to_string()));
        assert!(analysis.consulting_insights.contains(&"Roadmap".to_string()));
        assert!(analysis.keywords.contains(&"Governance".to_string()));
    }

    #[test]
    fn test_bullets_are_stripped() {
        assert_eq!(
            clean_lines("• Scale pilots\n2) Fund CoE\n   \n"),
            vec!["Scale pilots", "Fund CoE"]
        );
    }
}
