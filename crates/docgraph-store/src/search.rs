//! Keyword search over the graph: full linear scan in insertion order.

use serde::Serialize;

use crate::types::{Node, NodeType};

/// Metadata arrays compared against the query in both directions.
const KEYWORD_FIELDS: &[&str] = &["keywords", "aiKeywords", "consultingInsights", "keyMessages"];

/// Search response consumed by the renderer as a highlight path.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub query: String,
    /// Matched node IDs in insertion order.
    pub path: Vec<String>,
    pub insights: Vec<String>,
    pub matched_nodes: Vec<Node>,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq)]
enum MatchKind {
    Label,
    Title(String),
    Keyword(String),
    ExtractedText,
}

/// Case-insensitive match of `query` against every node.
pub fn search_nodes(nodes: &[Node], query: &str) -> SearchResult {
    let needle = query.trim().to_lowercase();
    let mut result = SearchResult {
        query: query.to_string(),
        ..Default::default()
    };
    if needle.is_empty() {
        return result;
    }

    for node in nodes {
        if let Some(kind) = match_node(node, &needle) {
            result.path.push(node.id.clone());
            result.insights.push(describe(node, &kind, query.trim()));
            result.matched_nodes.push(node.clone());
        }
    }
    result.total = result.path.len();
    result
}

fn match_node(node: &Node, needle: &str) -> Option<MatchKind> {
    if node.label.to_lowercase().contains(needle) {
        return Some(MatchKind::Label);
    }
    if let Some(title) = node.meta_str("title") {
        if title.to_lowercase().contains(needle) {
            return Some(MatchKind::Title(title.to_string()));
        }
    }
    for field in KEYWORD_FIELDS {
        for keyword in node.meta_strings(field) {
            let kw = keyword.trim().to_lowercase();
            if kw.is_empty() {
                continue;
            }
            if kw.contains(needle) || needle.contains(&kw) {
                return Some(MatchKind::Keyword(keyword.to_string()));
            }
        }
    }
    if let Some(text) = node.meta_str("extractedText") {
        if text.to_lowercase().contains(needle) {
            return Some(MatchKind::ExtractedText);
        }
    }
    None
}

fn describe(node: &Node, kind: &MatchKind, query: &str) -> String {
    let subject = match (node.node_type, node.metadata.get("pageNumber").and_then(|v| v.as_u64())) {
        (NodeType::PageImage, Some(page)) => format!("Page {} ('{}')", page, node.label),
        _ => format!("{} '{}'", node.node_type, node.label),
    };
    match kind {
        MatchKind::Label => format!("{} matches \"{}\" by name", subject, query),
        MatchKind::Title(title) => {
            format!("{} has a title related to \"{}\": {}", subject, query, title)
        }
        MatchKind::Keyword(keyword) => {
            format!("{} is tagged with keyword '{}' related to \"{}\"", subject, keyword, query)
        }
        MatchKind::ExtractedText => {
            format!("{} mentions \"{}\" in its extracted text", subject, query)
        }
    }
}
