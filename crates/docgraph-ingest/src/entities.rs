//! Entity node synthesis from a document profile.

use docgraph_store::layout::{layout_group, LayoutGroup};
use docgraph_store::{Node, NodeType};
use serde_json::json;

use crate::profile::{CandidateEntity, DocumentProfile};

const TOP_CONFIDENCE: f64 = 0.95;
const CONFIDENCE_STEP: f64 = 0.04;
const CONFIDENCE_CYCLE: usize = 5;

/// Node ID scheme for one upload. `sequence` is unique per store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentIds {
    pub sequence: u64,
}

impl DocumentIds {
    pub fn new(sequence: u64) -> Self {
        Self { sequence }
    }

    /// `page_number` is 1-based.
    pub fn page(&self, page_number: usize) -> String {
        format!("doc{}-page-{}", self.sequence, page_number)
    }

    pub fn ai_keyword(&self, index: usize) -> String {
        format!("doc{}-ai-{}", self.sequence, index)
    }

    pub fn insight(&self, index: usize) -> String {
        format!("doc{}-insight-{}", self.sequence, index)
    }
}

/// Shared provenance written into every entity node.
#[derive(Debug, Clone, Copy)]
pub struct EntityContext<'a> {
    pub ids: DocumentIds,
    pub document_id: &'a str,
    pub file_name: &'a str,
    /// Titles of the document's pages, in page order.
    pub page_titles: &'a [String],
}

/// Confidence for the `index`-th entity of a list.
pub fn entity_confidence(index: usize) -> f64 {
    TOP_CONFIDENCE - (index % CONFIDENCE_CYCLE) as f64 * CONFIDENCE_STEP
}

fn entity_nodes<F>(
    candidates: &[CandidateEntity],
    node_type: NodeType,
    ctx: &EntityContext<'_>,
    id_for: F,
) -> Vec<Node>
where
    F: Fn(usize) -> String,
{
    let page_count = ctx.page_titles.len();
    let mut nodes: Vec<Node> = candidates
        .iter()
        .enumerate()
        .map(|(i, candidate)| {
            let (extracted_from, source_page) = if page_count == 0 {
                (String::new(), 0)
            } else {
                let page_index = i % page_count;
                (ctx.page_titles[page_index].clone(), page_index + 1)
            };
            Node::new(id_for(i), candidate.label, node_type)
                .with_confidence(entity_confidence(i))
                .with_metadata(json!({
                    "category": candidate.category,
                    "extractedFrom": extracted_from,
                    "sourcePage": source_page,
                    "keywords": [candidate.label, candidate.category],
                    "documentId": ctx.document_id,
                    "fileName": ctx.file_name,
                }))
        })
        .collect();
    layout_group(&mut nodes, LayoutGroup::for_node_type(node_type));
    nodes
}

/// One `ai_keyword` node per candidate phrase in the profile.
pub fn ai_keyword_nodes(profile: &DocumentProfile, ctx: &EntityContext<'_>) -> Vec<Node> {
    entity_nodes(profile.ai_keywords, NodeType::AiKeyword, ctx, |i| {
        ctx.ids.ai_keyword(i)
    })
}

/// One `consulting_insight` node per candidate phrase in the profile.
pub fn insight_nodes(profile: &DocumentProfile, ctx: &EntityContext<'_>) -> Vec<Node> {
    entity_nodes(profile.consulting_insights, NodeType::ConsultingInsight, ctx, |i| {
        ctx.ids.insight(i)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{LOTTE_CHEMICAL, SAMSUNG};
    use docgraph_store::layout::radial_position;

    fn titles(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("Page {}", i)).collect()
    }

    #[test]
    fn test_confidence_cycles_over_five() {
        assert!((entity_confidence(0) - 0.95).abs() < 1e-9);
        assert!((entity_confidence(4) - 0.79).abs() < 1e-9);
        assert!((entity_confidence(5) - 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_lotte_ai_keywords() {
        let page_titles = titles(28);
        let ctx = EntityContext {
            ids: DocumentIds::new(3),
            document_id: "d-1",
            file_name: "롯데케미칼_AIDT.pdf",
            page_titles: &page_titles,
        };
        let nodes = ai_keyword_nodes(&LOTTE_CHEMICAL, &ctx);
        assert_eq!(nodes.len(), 14);
        assert_eq!(nodes[0].id, "doc3-ai-0");
        assert_eq!(nodes[2].meta_str("extractedFrom"), Some("Page 3"));
        assert_eq!(nodes[2].metadata["sourcePage"], 3);
        assert_eq!(nodes[2].meta_str("documentId"), Some("d-1"));
        for (i, node) in nodes.iter().enumerate() {
            let pos = radial_position(LayoutGroup::AiKeywords, i, nodes.len());
            assert_eq!((node.x, node.y, node.z), (pos.x, pos.y, pos.z));
        }
    }

    #[test]
    fn test_source_page_wraps_around() {
        let page_titles = titles(4);
        let ctx = EntityContext {
            ids: DocumentIds::new(1),
            document_id: "d",
            file_name: "samsung.pdf",
            page_titles: &page_titles,
        };
        let nodes = insight_nodes(&SAMSUNG, &ctx);
        assert_eq!(nodes.len(), 10);
        assert_eq!(nodes[5].meta_str("extractedFrom"), Some("Page 2"));
        assert_eq!(nodes[5].node_type, NodeType::ConsultingInsight);
        assert_eq!(nodes[5].id, "doc1-insight-5");
    }

    #[test]
    fn test_ids_are_distinct_across_sequences() {
        assert_ne!(DocumentIds::new(1).page(1), DocumentIds::new(2).page(1));
        assert_eq!(DocumentIds::new(7).page(12), "doc7-page-12");
    }
}
