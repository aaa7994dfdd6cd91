//! Edge construction for one upload. Pure functions of node IDs.

use docgraph_store::{Edge, EdgeType};

pub const NEXT_PAGE_STRENGTH: f64 = 1.0;
pub const AI_CONCEPT_STRENGTH: f64 = 0.8;
pub const INSIGHT_STRENGTH: f64 = 0.7;

/// `next_page` edges chaining the pages in order: `N - 1` edges for `N` pages.
pub fn sequential_edges(page_ids: &[String]) -> Vec<Edge> {
    page_ids
        .windows(2)
        .map(|pair| Edge::new(&pair[0], &pair[1], EdgeType::NextPage, NEXT_PAGE_STRENGTH))
        .collect()
}

/// Connect entity `i` to page `i % N`. Returns nothing when there are no pages.
pub fn fan_edges<F>(
    page_ids: &[String],
    entity_ids: &[String],
    edge_type: EdgeType,
    strength: f64,
    evidence: F,
) -> Vec<Edge>
where
    F: Fn(usize) -> String,
{
    if page_ids.is_empty() {
        return Vec::new();
    }
    entity_ids
        .iter()
        .enumerate()
        .map(|(i, entity)| {
            let page_index = i % page_ids.len();
            Edge::new(&page_ids[page_index], entity, edge_type, strength)
                .with_evidence(evidence(page_index + 1))
        })
        .collect()
}

/// All edges for an upload: the page chain, then AI concepts, then insights.
pub fn build_relationships(
    page_ids: &[String],
    ai_ids: &[String],
    insight_ids: &[String],
) -> Vec<Edge> {
    let mut edges = sequential_edges(page_ids);
    edges.extend(fan_edges(
        page_ids,
        ai_ids,
        EdgeType::ContainsAiConcept,
        AI_CONCEPT_STRENGTH,
        |n| format!("AI concept referenced on page {}", n),
    ));
    edges.extend(fan_edges(
        page_ids,
        insight_ids,
        EdgeType::GeneratesInsight,
        INSIGHT_STRENGTH,
        |n| format!("Consulting insight derived from page {}", n),
    ));
    edges
}
