//! Fixed baseline ontology loaded by `reset(true)`.

use serde_json::json;

use crate::layout::{layout_group, LayoutGroup};
use crate::types::{Edge, EdgeType, Node, NodeType};

pub const SEED_NODE_COUNT: usize = 8;
pub const SEED_LINK_COUNT: usize = 10;

const ORGANIZATION: (&str, &str, &str) = (
    "seed-org-consulting",
    "Digital Consulting Group",
    "Consulting practice delivering AI and data transformation programs",
);

const CLIENTS: &[(&str, &str, &[&str])] = &[
    ("seed-client-lotte", "Lotte Chemical", &["롯데케미칼", "chemical", "AIDT"]),
    ("seed-client-samsung", "Samsung Electronics", &["삼성전자", "semiconductor", "DX"]),
    ("seed-client-hyundai", "Hyundai Motor", &["현대자동차", "mobility", "smart factory"]),
];

const CAPABILITIES: &[(&str, &str, &[&str])] = &[
    ("seed-cap-ai-strategy", "AI Strategy", &["AI", "AI 전략", "roadmap"]),
    ("seed-cap-data-platform", "Data Platform", &["data", "데이터 플랫폼", "lakehouse"]),
    ("seed-cap-process-automation", "Process Automation", &["RPA", "자동화", "workflow"]),
    ("seed-cap-change-management", "Change Management", &["변화관리", "adoption", "training"]),
];

/// Client → capability engagements.
const ENGAGEMENTS: &[(&str, &str)] = &[
    ("seed-client-lotte", "seed-cap-ai-strategy"),
    ("seed-client-samsung", "seed-cap-data-platform"),
    ("seed-client-hyundai", "seed-cap-process-automation"),
];

pub fn seed_ontology() -> (Vec<Node>, Vec<Edge>) {
    let (org_id, org_label, org_description) = ORGANIZATION;
    let mut orgs = vec![Node::new(org_id, org_label, NodeType::Organization).with_metadata(json!({
        "title": org_label,
        "description": org_description,
        "keywords": ["consulting", "컨설팅", "digital transformation"],
    }))];
    layout_group(&mut orgs, LayoutGroup::Organizations);

    let mut clients: Vec<Node> = CLIENTS
        .iter()
        .map(|(id, label, keywords)| {
            Node::new(*id, *label, NodeType::Client)
                .with_confidence(1.0)
                .with_metadata(json!({ "title": label, "keywords": keywords }))
        })
        .collect();
    layout_group(&mut clients, LayoutGroup::Clients);

    let mut capabilities: Vec<Node> = CAPABILITIES
        .iter()
        .map(|(id, label, keywords)| {
            Node::new(*id, *label, NodeType::Capability)
                .with_confidence(0.9)
                .with_metadata(json!({ "title": label, "keywords": keywords }))
        })
        .collect();
    layout_group(&mut capabilities, LayoutGroup::Capabilities);

    let mut links = Vec::with_capacity(SEED_LINK_COUNT);
    for client in &clients {
        links.push(
            Edge::new(org_id, client.id.clone(), EdgeType::Serves, 0.9)
                .with_evidence("Active client engagement"),
        );
    }
    for capability in &capabilities {
        links.push(
            Edge::new(org_id, capability.id.clone(), EdgeType::Provides, 0.85)
                .with_evidence("Practice capability"),
        );
    }
    for (client, capability) in ENGAGEMENTS {
        links.push(
            Edge::new(*client, *capability, EdgeType::Contains, 0.75)
                .with_evidence("Capability in scope of engagement"),
        );
    }

    let mut nodes = orgs;
    nodes.extend(clients);
    nodes.extend(capabilities);
    (nodes, links)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_counts_match_constants() {
        let (nodes, links) = seed_ontology();
        assert_eq!(nodes.len(), SEED_NODE_COUNT);
        assert_eq!(links.len(), SEED_LINK_COUNT);
    }

    #[test]
    fn test_seed_links_reference_seed_nodes() {
        let (nodes, links) = seed_ontology();
        let ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids.len(), nodes.len());
        for link in &links {
            assert!(ids.contains(link.source.as_str()), "{}", link.source);
            assert!(ids.contains(link.target.as_str()), "{}", link.target);
        }
    }

    #[test]
    fn test_seed_is_deterministic() {
        assert_eq!(seed_ontology().0, seed_ontology().0);
    }
}
