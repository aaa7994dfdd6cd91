//! Data types for graph nodes, edges, and store statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of vertex in the ontology graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    /// One page of an uploaded document.
    PageImage,
    AiKeyword,
    ConsultingInsight,
    Organization,
    Client,
    Capability,
}

impl NodeType {
    /// Renderer color for this node class.
    pub fn default_color(&self) -> &'static str {
        match self {
            Self::PageImage => "#4A90E2",
            Self::AiKeyword => "#9B59B6",
            Self::ConsultingInsight => "#F39C12",
            Self::Organization => "#2ECC71",
            Self::Client => "#E74C3C",
            Self::Capability => "#1ABC9C",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PageImage => "page_image",
            Self::AiKeyword => "ai_keyword",
            Self::ConsultingInsight => "consulting_insight",
            Self::Organization => "organization",
            Self::Client => "client",
            Self::Capability => "capability",
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of directed relationship between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeType {
    NextPage,
    ContainsAiConcept,
    GeneratesInsight,
    Contains,
    Provides,
    Serves,
}

impl EdgeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NextPage => "next_page",
            Self::ContainsAiConcept => "contains_ai_concept",
            Self::GeneratesInsight => "generates_insight",
            Self::Contains => "contains",
            Self::Provides => "provides",
            Self::Serves => "serves",
        }
    }
}

impl std::fmt::Display for EdgeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A graph vertex with render coordinates and a loosely-typed metadata bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub color: String,
    pub confidence: f64,
    #[serde(default = "empty_object")]
    pub metadata: Value,
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

impl Node {
    pub fn new(id: impl Into<String>, label: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            node_type,
            x: 0.0,
            y: 0.0,
            z: 0.0,
            color: node_type.default_color().to_string(),
            confidence: 1.0,
            metadata: empty_object(),
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }

    /// Read a string field from the metadata bag.
    pub fn meta_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(|v| v.as_str())
    }

    /// Read a string array from the metadata bag, skipping non-string entries.
    pub fn meta_strings(&self, key: &str) -> Vec<&str> {
        self.metadata
            .get(key)
            .and_then(|v| v.as_array())
            .map(|items| items.iter().filter_map(|v| v.as_str()).collect())
            .unwrap_or_default()
    }
}

/// A directed, typed, weighted connection between two node IDs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
    pub strength: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

impl Edge {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        edge_type: EdgeType,
        strength: f64,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            edge_type,
            strength,
            evidence: None,
        }
    }

    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = Some(evidence.into());
        self
    }
}

/// Store-level statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub node_count: usize,
    pub link_count: usize,
    pub nodes_by_type: BTreeMap<String, usize>,
    pub links_by_type: BTreeMap<String, usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_serializes_type_field() {
        let node = Node::new("n1", "Cover", NodeType::PageImage)
            .with_metadata(serde_json::json!({"pageNumber": 1}));
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "page_image");
        assert_eq!(json["color"], NodeType::PageImage.default_color());
        assert_eq!(json["metadata"]["pageNumber"], 1);
    }

    #[test]
    fn test_edge_omits_missing_evidence() {
        let edge = Edge::new("a", "b", EdgeType::NextPage, 1.0);
        let json = serde_json::to_value(&edge).unwrap();
        assert_eq!(json["type"], "next_page");
        assert!(json.get("evidence").is_none());
    }

    #[test]
    fn test_meta_strings_skips_non_strings() {
        let node = Node::new("n", "n", NodeType::AiKeyword)
            .with_metadata(serde_json::json!({"keywords": ["AI", 3, "ML"]}));
        assert_eq!(node.meta_strings("keywords"), vec!["AI", "ML"]);
        assert!(node.meta_strings("missing").is_empty());
    }
}
