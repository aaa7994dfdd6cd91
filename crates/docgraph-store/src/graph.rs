//! In-memory ontology graph shared by all request handlers.
//!
//! The store is an explicit object held in application state. Every
//! mutation takes the write lock once, so readers never see a half-applied
//! upload or reset.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::info;

use crate::search::{self, SearchResult};
use crate::seed;
use crate::types::{Edge, GraphStats, Node};

/// Node and link lists in insertion order.
#[derive(Debug, Default)]
struct GraphData {
    nodes: Vec<Node>,
    links: Vec<Edge>,
}

impl GraphData {
    fn stats(&self) -> GraphStats {
        let mut nodes_by_type = BTreeMap::new();
        for node in &self.nodes {
            *nodes_by_type.entry(node.node_type.to_string()).or_insert(0) += 1;
        }
        let mut links_by_type = BTreeMap::new();
        for link in &self.links {
            *links_by_type.entry(link.edge_type.to_string()).or_insert(0) += 1;
        }
        GraphStats {
            node_count: self.nodes.len(),
            link_count: self.links.len(),
            nodes_by_type,
            links_by_type,
        }
    }
}

pub struct GraphStore {
    data: RwLock<GraphData>,
    sequence: AtomicU64,
}

impl GraphStore {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(GraphData::default()),
            sequence: AtomicU64::new(0),
        }
    }

    /// Store pre-populated with the seed ontology.
    pub fn with_seed() -> Self {
        let store = Self::new();
        store.reset(true);
        store
    }

    pub fn list_nodes(&self) -> Vec<Node> {
        self.data.read().nodes.clone()
    }

    pub fn list_links(&self) -> Vec<Edge> {
        self.data.read().links.clone()
    }

    /// Linear scan by ID; the store keeps no index.
    pub fn get_node(&self, id: &str) -> Option<Node> {
        self.data.read().nodes.iter().find(|n| n.id == id).cloned()
    }

    /// Append a batch without validating IDs or edge endpoints.
    pub fn append_all(&self, nodes: Vec<Node>, links: Vec<Edge>) -> GraphStats {
        let mut data = self.data.write();
        data.nodes.extend(nodes);
        data.links.extend(links);
        data.stats()
    }

    /// Replace both lists wholesale.
    pub fn replace_all(&self, nodes: Vec<Node>, links: Vec<Edge>) -> GraphStats {
        let mut data = self.data.write();
        *data = GraphData { nodes, links };
        data.stats()
    }

    /// Clear the graph, optionally repopulating it with the seed ontology.
    pub fn reset(&self, load_seed: bool) -> GraphStats {
        let (nodes, links) = if load_seed {
            seed::seed_ontology()
        } else {
            (Vec::new(), Vec::new())
        };
        let stats = self.replace_all(nodes, links);
        info!(
            "Graph reset (seed={}): {} nodes, {} links",
            load_seed, stats.node_count, stats.link_count
        );
        stats
    }

    /// Next value of the per-store upload sequence, starting at 1.
    pub fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn stats(&self) -> GraphStats {
        self.data.read().stats()
    }

    pub fn search(&self, query: &str) -> SearchResult {
        let data = self.data.read();
        search::search_nodes(&data.nodes, query)
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EdgeType, NodeType};

    #[test]
    fn test_append_keeps_insertion_order_and_duplicates() {
        let store = GraphStore::new();
        let node = Node::new("a", "A", NodeType::AiKeyword);
        store.append_all(vec![node.clone()], vec![]);
        let stats = store.append_all(
            vec![node, Node::new("b", "B", NodeType::PageImage)],
            vec![Edge::new("b", "missing", EdgeType::ContainsAiConcept, 0.8)],
        );
        assert_eq!(stats.node_count, 3);
        assert_eq!(stats.link_count, 1);
        assert_eq!(stats.nodes_by_type["ai_keyword"], 2);
        let ids: Vec<String> = store.list_nodes().into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec!["a", "a", "b"]);
    }

    #[test]
    fn test_reset_without_seed_clears_everything() {
        let store = GraphStore::with_seed();
        assert!(!store.list_nodes().is_empty());
        let stats = store.reset(false);
        assert_eq!(stats.node_count, 0);
        assert!(store.list_nodes().is_empty());
        assert!(store.list_links().is_empty());
    }

    #[test]
    fn test_reset_with_seed_matches_static_definition() {
        let store = GraphStore::new();
        let stats = store.reset(true);
        assert_eq!(stats.node_count, seed::SEED_NODE_COUNT);
        assert_eq!(stats.link_count, seed::SEED_LINK_COUNT);
    }

    #[test]
    fn test_sequence_is_monotonic() {
        let store = GraphStore::new();
        assert_eq!(store.next_sequence(), 1);
        assert_eq!(store.next_sequence(), 2);
        store.reset(false);
        assert_eq!(store.next_sequence(), 3);
    }

    #[test]
    fn test_get_node_linear_lookup() {
        let store = GraphStore::with_seed();
        let first = store.list_nodes()[0].clone();
        assert_eq!(store.get_node(&first.id), Some(first));
        assert!(store.get_node("nope").is_none());
    }
}
